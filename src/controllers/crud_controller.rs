use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde_json::json;

use crate::{models::Entity, render, store::EntityStore, AppState};

use super::home_controller;

/// Empty input is `None`; anything else must parse.
pub fn parse_opt<T: FromStr>(raw: &str, label: &str) -> Result<Option<T>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| format!("{label} must be a number"))
}

/// Numeric id from a path segment; anything else gets the 404 page.
pub fn path_id(state: &AppState, headers: &HeaderMap, raw: &str) -> Result<i64, Response> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| home_controller::not_found_page(state, headers))
}

pub fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn render_delete<E: Entity>(
    state: &AppState,
    headers: &HeaderMap,
    id: i64,
    error_message: Option<&str>,
) -> Response {
    let ctx = json!({
        "label": E::LABEL,
        "route": E::ROUTE,
        "id": id,
        "error_message": error_message,
        "can_delete": error_message.is_none(),
    });
    render::render_page(
        state,
        headers,
        StatusCode::OK,
        &format!("Delete {}", E::LABEL),
        "entity/delete",
        &ctx,
    )
}

// GET /{route}/:id/delete
pub async fn get_delete_dialog<E: Entity>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
) -> Response {
    let id = match path_id(&state, &headers, &raw) {
        Ok(id) => id,
        Err(page) => return page,
    };
    let store = EntityStore::<E>::new();
    let loaded = store.get_entity(&state.api, id).await;

    render_delete::<E>(&state, &headers, id, loaded.error_message.as_deref())
}

// POST /{route}/:id/delete
pub async fn post_delete<E: Entity>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw): Path<String>,
) -> Response {
    let id = match path_id(&state, &headers, &raw) {
        Ok(id) => id,
        Err(page) => return page,
    };
    let store = EntityStore::<E>::new();
    let deleted = store.delete_entity(&state.api, id).await;

    if deleted.update_success {
        return render::navigate(&headers, E::ROUTE);
    }

    render_delete::<E>(&state, &headers, id, deleted.error_message.as_deref())
}
