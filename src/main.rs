//! Org-Chart Backend
//!
//! REST backend for an org-chart editor: a single persisted state document,
//! training-topic lists, and employee photo uploads served from SQLite plus a
//! managed uploads directory.

mod api;
mod config;
mod db;
mod defaults;
mod errors;
mod models;
mod photos;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Request body ceiling; generous because legacy clients push inline
/// Base64-encoded photos inside the state document.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Org-Chart Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Public base URL: {}", config.public_base_url);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Ensure the uploads directory exists before serving from it
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        .route("/employees", get(api::get_employees))
        .route("/employees/update", post(api::update_employees))
        .route("/employees/{id}/upload-photo", post(api::upload_photo));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    // Stored photos are served from the uploads directory at the server root,
    // matching the URLs built by the photo resolver.
    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .fallback_service(uploads)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
