use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::AppState;

pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn render_full(state: &AppState, title: &str, body_html: String) -> Result<String, String> {
    let ctx = json!({
        "title": title,
        "body": body_html,
    });

    state
        .hbs
        .render("layouts/base", &ctx)
        .map_err(|e| e.to_string())
}

/// Render `tpl`; HTMX requests get the body alone, others the full layout.
pub fn render_page(
    state: &AppState,
    headers: &HeaderMap,
    status: StatusCode,
    title: &str,
    tpl: &str,
    ctx: &serde_json::Value,
) -> Response {
    let body = match state.hbs.render(tpl, ctx) {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("template error: {e}")),
            )
                .into_response()
        }
    };

    if is_htmx(headers) {
        return (status, Html(body)).into_response();
    }

    match render_full(state, title, body) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("template error: {e}"))).into_response(),
    }
}

/// Navigate after a successful write: `HX-Redirect` for HTMX, 303 otherwise.
pub fn navigate(headers: &HeaderMap, to: &str) -> Response {
    if is_htmx(headers) {
        let mut out = HeaderMap::new();
        out.insert(
            "hx-redirect",
            HeaderValue::from_str(to).unwrap_or_else(|_| HeaderValue::from_static("/")),
        );
        return (StatusCode::OK, out).into_response();
    }
    Redirect::to(to).into_response()
}

/// `<option>` entries with the current value marked.
pub fn select_options<'a>(values: impl IntoIterator<Item = &'a str>, selected: &str) -> Vec<serde_json::Value> {
    values
        .into_iter()
        .map(|v| json!({ "value": v, "selected": v == selected }))
        .collect()
}

pub fn fmt_opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}
