//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook appointment service.
//! It exposes doctor profiles, per-day availability and appointment booking
//! over REST.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Fetch inputs from the database and call into `slotbook-core`
//! - **Middleware**: Error to HTTP response mapping
//! - **Config**: Environment-driven settings
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderValue, StatusCode},
    BoxError, Router,
};
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
}

/// Builds the router with every endpoint and request tracing.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Profile management endpoints
        .merge(routes::profile::routes())
        // Availability endpoints
        .merge(routes::availability::routes())
        // Booking endpoints
        .merge(routes::appointment::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = slotbook_api::config::ApiConfig::from_env()?;
/// let db_pool = slotbook_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// slotbook_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = build_router(Arc::new(ApiState { db_pool }));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
