use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{Entity, Region, Security, SecurityType},
    render,
    store::SecurityStore,
    AppState,
};

use super::crud_controller::{non_empty, path_id};

fn security_json(s: &Security) -> serde_json::Value {
    json!({
        "id": s.id,
        "name": s.name,
        "ticker": s.ticker,
        "type": s.kind.map(|t| t.as_str()),
        "region": s.region.map(|r| r.as_str()),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub region: String,
}

impl SecurityForm {
    fn for_new() -> Self {
        SecurityForm {
            kind: SecurityType::default().as_str().to_string(),
            region: Region::default().as_str().to_string(),
            ..Default::default()
        }
    }

    fn from_entity(s: &Security) -> Self {
        SecurityForm {
            name: s.name.clone().unwrap_or_default(),
            ticker: s.ticker.clone().unwrap_or_default(),
            kind: s.kind.map(|t| t.as_str().to_string()).unwrap_or_default(),
            region: s.region.map(|r| r.as_str().to_string()).unwrap_or_default(),
        }
    }

    /// Merge the submitted values into `entity`.
    pub fn apply(&self, entity: &mut Security) -> Result<(), String> {
        entity.name = non_empty(&self.name);
        entity.ticker = non_empty(&self.ticker);
        entity.kind = non_empty(&self.kind)
            .map(|s| s.parse::<SecurityType>())
            .transpose()?;
        entity.region = non_empty(&self.region)
            .map(|s| s.parse::<Region>())
            .transpose()?;
        Ok(())
    }
}

fn render_form(
    state: &AppState,
    headers: &HeaderMap,
    id: Option<i64>,
    form: &SecurityForm,
    error_message: Option<&str>,
) -> Response {
    let ctx = json!({
        "is_new": id.is_none(),
        "id": id,
        "action": match id {
            Some(id) => format!("{}/{id}/edit", Security::ROUTE),
            None => format!("{}/new", Security::ROUTE),
        },
        "name": form.name,
        "ticker": form.ticker,
        "type_options": render::select_options(SecurityType::ALL.iter().map(|t| t.as_str()), &form.kind),
        "region_options": render::select_options(Region::ALL.iter().map(|r| r.as_str()), &form.region),
        "error_message": error_message,
    });
    render::render_page(state, headers, StatusCode::OK, "Create or edit a Security", "security/update", &ctx)
}

// GET /security
pub async fn get_security_list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let store = SecurityStore::new();
    let list = store.get_entities(&state.api).await;

    let rows: Vec<serde_json::Value> = list.entities.iter().map(security_json).collect();
    let ctx = json!({
        "securities": rows,
        "has_items": !rows.is_empty(),
        "loading": list.loading,
        "error_message": list.error_message,
    });
    render::render_page(&state, &headers, StatusCode::OK, "Securities", "security/list", &ctx)
}

// GET /security/:id
pub async fn get_security_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
) -> Response {
    let id = match path_id(&state, &headers, &raw) {
        Ok(id) => id,
        Err(page) => return page,
    };
    let store = SecurityStore::new();
    let loaded = store.get_entity(&state.api, id).await;

    let ctx = json!({
        "security": security_json(&loaded.entity),
        "error_message": loaded.error_message,
    });
    render::render_page(&state, &headers, StatusCode::OK, "Security", "security/detail", &ctx)
}

// GET /security/new
pub async fn get_security_new(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_form(&state, &headers, None, &SecurityForm::for_new(), None)
}

// GET /security/:id/edit
pub async fn get_security_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
) -> Response {
    let id = match path_id(&state, &headers, &raw) {
        Ok(id) => id,
        Err(page) => return page,
    };
    let store = SecurityStore::new();
    let loaded = store.get_entity(&state.api, id).await;

    let form = SecurityForm::from_entity(&loaded.entity);
    render_form(&state, &headers, Some(id), &form, loaded.error_message.as_deref())
}

// POST /security/new
pub async fn post_security_new(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SecurityForm>,
) -> Response {
    let store = SecurityStore::new();
    let mut entity = store.reset().entity;

    if let Err(e) = form.apply(&mut entity) {
        return render_form(&state, &headers, None, &form, Some(&e));
    }

    let saved = store.create_entity(&state.api, entity).await;
    if saved.update_success {
        return render::navigate(&headers, Security::ROUTE);
    }
    render_form(&state, &headers, None, &form, saved.error_message.as_deref())
}

// POST /security/:id/edit
pub async fn post_security_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
    Form(form): Form<SecurityForm>,
) -> Response {
    let id = match path_id(&state, &headers, &raw) {
        Ok(id) => id,
        Err(page) => return page,
    };
    let store = SecurityStore::new();
    let loaded = store.get_entity(&state.api, id).await;
    if let Some(e) = loaded.error_message.as_deref() {
        return render_form(&state, &headers, Some(id), &form, Some(e));
    }

    let mut entity = loaded.entity;
    if let Err(e) = form.apply(&mut entity) {
        return render_form(&state, &headers, Some(id), &form, Some(&e));
    }

    let saved = store.update_entity(&state.api, entity).await;
    if saved.update_success {
        return render::navigate(&headers, Security::ROUTE);
    }
    render_form(&state, &headers, Some(id), &form, saved.error_message.as_deref())
}
