use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use frontdesk_backend::config::Config;
use frontdesk_backend::io::rest::{api_router, AppState};
use frontdesk_backend::storage::DbConnection;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = Config::from_env();
    info!("setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    let state = AppState::new(db, &config);
    state
        .auth
        .ensure_admin(&config.admin_username, &config.admin_password)
        .await?;

    // CORS setup to allow the admin frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = api_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
