//! Library entrypoint for the retirement admin.
//!
//! The binary only wires configuration and storage; integration tests under
//! `tests/` build the same [`AppState`] and routers from here.

pub mod config;
pub mod errors;
pub mod models;

pub mod services;
pub mod store;

#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub db: services::db::Database,
    pub settings: config::Settings,
    pub api: services::api_client::ApiClient,
}
