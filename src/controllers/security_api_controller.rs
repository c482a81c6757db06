use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    errors::{entity_alert, header_value, ApiError},
    models::{Entity, Security},
    services::entity_service,
    AppState,
};

use super::api_support::parse_merge_patch;

const ENTITY: &str = Security::ENTITY_NAME;

// POST /api/securities
pub async fn create_security(
    State(state): State<AppState>,
    Json(security): Json<Security>,
) -> Result<Response, ApiError> {
    let result = entity_service::create(&state.db, security).await?;
    let id = result.id.unwrap_or_default().to_string();

    let mut headers = entity_alert(ENTITY, "created", &id);
    headers.insert(
        header::LOCATION,
        header_value(&format!("/{}/{id}", Security::API_PATH)),
    );

    Ok((StatusCode::CREATED, headers, Json(result)).into_response())
}

// PUT /api/securities/:id
pub async fn update_security(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(security): Json<Security>,
) -> Result<Response, ApiError> {
    let result = entity_service::update(&state.db, id, security).await?;
    let headers = entity_alert(ENTITY, "updated", &id.to_string());

    Ok((StatusCode::OK, headers, Json(result)).into_response())
}

// PATCH /api/securities/:id
pub async fn partial_update_security(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let patch: Security = parse_merge_patch(&headers, &body, ENTITY)?;
    let result = entity_service::partial_update(&state.db, id, patch).await?;
    let headers = entity_alert(ENTITY, "updated", &id.to_string());

    Ok((StatusCode::OK, headers, Json(result)).into_response())
}

// GET /api/securities
pub async fn get_all_securities(State(state): State<AppState>) -> Result<Json<Vec<Security>>, ApiError> {
    entity_service::find_all::<Security>(&state.db).await.map(Json)
}

// GET /api/securities/:id
pub async fn get_security(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Security>, ApiError> {
    entity_service::find_one::<Security>(&state.db, id).await.map(Json)
}

// DELETE /api/securities/:id
pub async fn delete_security(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    entity_service::delete::<Security>(&state.db, id).await?;
    let headers = entity_alert(ENTITY, "deleted", &id.to_string());

    Ok((StatusCode::NO_CONTENT, headers).into_response())
}
