#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use http_body_util::BodyExt;
use retirement::{
    config::{Settings, StorageKind},
    routes,
    services::{api_client::ApiClient, db::Database},
    templates, AppState,
};

pub struct TestApp {
    pub base_url: String,
    pub state: AppState,
}

pub fn test_settings(api_base_url: &str) -> Settings {
    Settings {
        host: "127.0.0.1".to_string(),
        port: 0,
        storage: StorageKind::Memory,
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        mongodb_db: "retirement_test".to_string(),
        api_base_url: api_base_url.to_string(),
        templates_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates").to_string(),
    }
}

pub fn test_state(api_base_url: &str) -> AppState {
    let settings = test_settings(api_base_url);
    AppState {
        hbs: templates::build_handlebars(&settings.templates_dir).expect("templates"),
        db: Database::memory(),
        api: ApiClient::new(api_base_url),
        settings,
    }
}

/// Serve the whole app on an ephemeral port; views call back into the same
/// process through `state.api`.
pub async fn spawn_app() -> TestApp {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    let base_url = format!("http://{addr}");

    let state = test_state(&base_url);
    let app = routes::app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    TestApp { base_url, state }
}

pub async fn response_body_string(res: Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

pub async fn response_json(res: Response) -> serde_json::Value {
    let body = response_body_string(res).await;
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("invalid json {body}: {e}"))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
