use std::net::SocketAddr;

use retirement::{config, routes, services, templates, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let db = services::db::connect(&settings).await?;
    tracing::info!("storage: {}", db.kind());

    let state = AppState {
        hbs: templates::build_handlebars(&settings.templates_dir)?,
        db,
        api: services::api_client::ApiClient::new(settings.api_base_url.clone()),
        settings: settings.clone(),
    };

    let app = routes::app(state);

    let addr = SocketAddr::from((settings.host.parse::<std::net::IpAddr>()?, settings.port));
    tracing::info!("listening on http://{}", addr);
    tracing::info!("REST calls go to {}", settings.api_base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
