//! Server execution logic.

use std::sync::Arc;

use axum::{Router, http::HeaderValue, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handler::{
    health_check, list_circles, list_cities, nearby_cities, room_history, room_ws,
};
use super::signal::shutdown_signal;
use super::state::AppState;

/// Assemble the router. Kept separate from [`run_server`] so tests can
/// serve it on an ephemeral port.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        // WebSocket endpoint
        .route("/ws/{city}/{circle}", get(room_ws))
        // HTTP endpoints
        .route("/api/health", get(health_check))
        .route("/api/history/{city}/{circle}", get(room_history))
        .route("/api/cities", get(list_cities))
        .route("/api/circles/{city}", get(list_circles))
        .route("/api/nearby", get(nearby_cities));

    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if !origins.is_empty() {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Run the chat relay server
///
/// # Arguments
///
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 8080)
pub async fn run_server(
    host: &str,
    port: u16,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("chat relay listening on {}", listener.local_addr()?);
    tracing::info!("Connect to: ws://{}/ws/{{city}}/{{circle}}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    // Set up graceful shutdown signal handler
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
