use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    errors::{entity_alert, header_value, ApiError},
    models::{Entity, Purchase},
    services::{entity_service, purchase_service},
    AppState,
};

use super::api_support::parse_merge_patch;

const ENTITY: &str = Purchase::ENTITY_NAME;

// POST /api/purchases
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(purchase): Json<Purchase>,
) -> Result<Response, ApiError> {
    let saved = entity_service::create(&state.db, purchase).await?;
    let result = purchase_service::resolve_security(&state.db, saved).await?;
    let id = result.id.unwrap_or_default().to_string();

    let mut headers = entity_alert(ENTITY, "created", &id);
    headers.insert(
        header::LOCATION,
        header_value(&format!("/{}/{id}", Purchase::API_PATH)),
    );

    Ok((StatusCode::CREATED, headers, Json(result)).into_response())
}

// PUT /api/purchases/:id
pub async fn update_purchase(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(purchase): Json<Purchase>,
) -> Result<Response, ApiError> {
    let saved = entity_service::update(&state.db, id, purchase).await?;
    let result = purchase_service::resolve_security(&state.db, saved).await?;
    let headers = entity_alert(ENTITY, "updated", &id.to_string());

    Ok((StatusCode::OK, headers, Json(result)).into_response())
}

// PATCH /api/purchases/:id
pub async fn partial_update_purchase(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let patch: Purchase = parse_merge_patch(&headers, &body, ENTITY)?;
    let saved = entity_service::partial_update(&state.db, id, patch).await?;
    let result = purchase_service::resolve_security(&state.db, saved).await?;
    let headers = entity_alert(ENTITY, "updated", &id.to_string());

    Ok((StatusCode::OK, headers, Json(result)).into_response())
}

// GET /api/purchases
pub async fn get_all_purchases(State(state): State<AppState>) -> Result<Json<Vec<Purchase>>, ApiError> {
    let purchases = entity_service::find_all::<Purchase>(&state.db).await?;
    let resolved = purchase_service::resolve_securities(&state.db, purchases).await?;
    Ok(Json(resolved))
}

// GET /api/purchases/:id
pub async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Purchase>, ApiError> {
    let purchase = entity_service::find_one::<Purchase>(&state.db, id).await?;
    let resolved = purchase_service::resolve_security(&state.db, purchase).await?;
    Ok(Json(resolved))
}

// DELETE /api/purchases/:id
pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    entity_service::delete::<Purchase>(&state.db, id).await?;
    let headers = entity_alert(ENTITY, "deleted", &id.to_string());

    Ok((StatusCode::NO_CONTENT, headers).into_response())
}
