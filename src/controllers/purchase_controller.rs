use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{Currency, Entity, Purchase, Security},
    render::{self, fmt_opt},
    store::{EntityState, Lookup, PurchaseStore, SecurityStore},
    AppState,
};

use super::crud_controller::{non_empty, parse_opt, path_id};

fn purchase_json(p: &Purchase) -> serde_json::Value {
    json!({
        "id": p.id,
        "price": fmt_opt(p.price),
        "currency": p.currency.map(|c| c.as_str()),
        "number": fmt_opt(p.number),
        "comission": fmt_opt(p.comission),
        "security_id": p.security_id(),
        "security_route": Security::ROUTE,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseForm {
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub comission: String,
    #[serde(rename = "securityId", default)]
    pub security_id: String,
}

impl PurchaseForm {
    fn for_new() -> Self {
        PurchaseForm {
            currency: Currency::default().as_str().to_string(),
            ..Default::default()
        }
    }

    fn from_entity(p: &Purchase) -> Self {
        PurchaseForm {
            price: fmt_opt(p.price),
            currency: p.currency.map(|c| c.as_str().to_string()).unwrap_or_default(),
            number: fmt_opt(p.number),
            comission: fmt_opt(p.comission),
            security_id: fmt_opt(p.security_id()),
        }
    }

    /// Merge the submitted values into `entity`, resolving the chosen
    /// security against the already loaded list.
    pub fn apply(&self, entity: &mut Purchase, securities: &EntityState<Security>) -> Result<(), String> {
        entity.price = parse_opt::<f32>(&self.price, "Price")?;
        entity.currency = non_empty(&self.currency)
            .map(|s| s.parse::<Currency>())
            .transpose()?;
        entity.number = parse_opt::<i32>(&self.number, "Number")?;
        entity.comission = parse_opt::<f32>(&self.comission, "Comission")?;

        entity.security = match parse_opt::<i64>(&self.security_id, "Security")? {
            None => None,
            Some(id) => match securities.lookup(id) {
                Lookup::Found(s) => Some(s.clone()),
                Lookup::Missing(id) => return Err(format!("Security {id} does not exist")),
                Lookup::NotLoaded => return Err("Securities are not loaded".to_string()),
            },
        };
        Ok(())
    }
}

fn render_form(
    state: &AppState,
    headers: &HeaderMap,
    id: Option<i64>,
    form: &PurchaseForm,
    securities: &EntityState<Security>,
    error_message: Option<&str>,
) -> Response {
    let security_options: Vec<serde_json::Value> = securities
        .entities
        .iter()
        .filter_map(|s| {
            let sid = s.id?;
            Some(json!({
                "value": sid,
                "ticker": s.ticker,
                "selected": sid.to_string() == form.security_id.trim(),
            }))
        })
        .collect();

    // a failed securities fetch is shown when nothing else went wrong
    let error_message = error_message.or(securities.error_message.as_deref());

    let ctx = json!({
        "is_new": id.is_none(),
        "id": id,
        "action": match id {
            Some(id) => format!("{}/{id}/edit", Purchase::ROUTE),
            None => format!("{}/new", Purchase::ROUTE),
        },
        "price": form.price,
        "number": form.number,
        "comission": form.comission,
        "currency_options": render::select_options(Currency::ALL.iter().map(|c| c.as_str()), &form.currency),
        "security_options": security_options,
        "error_message": error_message,
    });
    render::render_page(state, headers, StatusCode::OK, "Create or edit a Purchase", "purchase/update", &ctx)
}

// GET /purchase
pub async fn get_purchase_list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let store = PurchaseStore::new();
    let list = store.get_entities(&state.api).await;

    let rows: Vec<serde_json::Value> = list.entities.iter().map(purchase_json).collect();
    let ctx = json!({
        "purchases": rows,
        "has_items": !rows.is_empty(),
        "loading": list.loading,
        "error_message": list.error_message,
    });
    render::render_page(&state, &headers, StatusCode::OK, "Purchases", "purchase/list", &ctx)
}

// GET /purchase/:id
pub async fn get_purchase_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
) -> Response {
    let id = match path_id(&state, &headers, &raw) {
        Ok(id) => id,
        Err(page) => return page,
    };
    let store = PurchaseStore::new();
    let loaded = store.get_entity(&state.api, id).await;

    let ctx = json!({
        "purchase": purchase_json(&loaded.entity),
        "error_message": loaded.error_message,
    });
    render::render_page(&state, &headers, StatusCode::OK, "Purchase", "purchase/detail", &ctx)
}

// GET /purchase/new
pub async fn get_purchase_new(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let securities = SecurityStore::new().get_entities(&state.api).await;

    render_form(&state, &headers, None, &PurchaseForm::for_new(), &securities, None)
}

// GET /purchase/:id/edit
pub async fn get_purchase_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
) -> Response {
    let id = match path_id(&state, &headers, &raw) {
        Ok(id) => id,
        Err(page) => return page,
    };
    let store = PurchaseStore::new();
    let loaded = store.get_entity(&state.api, id).await;
    let securities = SecurityStore::new().get_entities(&state.api).await;

    let form = PurchaseForm::from_entity(&loaded.entity);
    render_form(&state, &headers, Some(id), &form, &securities, loaded.error_message.as_deref())
}

// POST /purchase/new
pub async fn post_purchase_new(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PurchaseForm>,
) -> Response {
    let store = PurchaseStore::new();
    let securities = SecurityStore::new().get_entities(&state.api).await;
    let mut entity = store.reset().entity;

    if let Err(e) = form.apply(&mut entity, &securities) {
        return render_form(&state, &headers, None, &form, &securities, Some(&e));
    }

    let saved = store.create_entity(&state.api, entity).await;
    if saved.update_success {
        return render::navigate(&headers, Purchase::ROUTE);
    }
    render_form(&state, &headers, None, &form, &securities, saved.error_message.as_deref())
}

// POST /purchase/:id/edit
pub async fn post_purchase_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
    Form(form): Form<PurchaseForm>,
) -> Response {
    let id = match path_id(&state, &headers, &raw) {
        Ok(id) => id,
        Err(page) => return page,
    };
    let store = PurchaseStore::new();
    let loaded = store.get_entity(&state.api, id).await;
    let securities = SecurityStore::new().get_entities(&state.api).await;
    if let Some(e) = loaded.error_message.as_deref() {
        return render_form(&state, &headers, Some(id), &form, &securities, Some(e));
    }

    let mut entity = loaded.entity;
    if let Err(e) = form.apply(&mut entity, &securities) {
        return render_form(&state, &headers, Some(id), &form, &securities, Some(&e));
    }

    let saved = store.update_entity(&state.api, entity).await;
    if saved.update_success {
        return render::navigate(&headers, Purchase::ROUTE);
    }
    render_form(&state, &headers, Some(id), &form, &securities, saved.error_message.as_deref())
}
