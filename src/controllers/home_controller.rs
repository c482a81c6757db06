use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::{
    models::{Entity, Purchase, Security},
    render, AppState,
};

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = json!({
        "entities": [
            { "label": "Securities", "route": Security::ROUTE },
            { "label": "Purchases", "route": Purchase::ROUTE },
        ],
    });
    render::render_page(&state, &headers, StatusCode::OK, "Retirement", "pages/home", &ctx)
}

pub async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    not_found_page(&state, &headers)
}

pub fn not_found_page(state: &AppState, headers: &HeaderMap) -> Response {
    render::render_page(state, headers, StatusCode::NOT_FOUND, "404", "pages/not_found", &json!({}))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}

pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Html(format!("{}: ok", state.db.kind()))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("{} error: {}", state.db.kind(), e)),
        )
            .into_response(),
    }
}
