//! HTTP and WebSocket handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::domain::{ChatRecord, ConnectionId, RoomKey};
use crate::geo;
use crate::history::SEED_LIMIT;
use crate::sanitize::sanitize;

use super::broadcast::broadcast;
use super::frames::UsersFrame;
use super::session;
use super::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Seed history for a room, oldest first. Called by the page layer before
/// the live connection is up.
pub async fn room_history(
    State(state): State<Arc<AppState>>,
    Path((city, circle)): Path<(String, String)>,
) -> Result<Json<Vec<ChatRecord>>, StatusCode> {
    let key = RoomKey::new(&city, &circle);
    match state.history.recent(&key, SEED_LIMIT).await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            tracing::error!("failed to load history for {}: {}", key, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// List the known cities
pub async fn list_cities() -> Json<serde_json::Value> {
    Json(serde_json::json!({"cities": geo::cities()}))
}

/// List the circles of a city (empty if none)
pub async fn list_circles(Path(city): Path<String>) -> Json<serde_json::Value> {
    let city = sanitize(&city).to_lowercase();
    Json(serde_json::json!({"circles": geo::circles_for(&city)}))
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Suggest up to three closest known cities to the given coordinates
pub async fn nearby_cities(Query(query): Query<NearbyQuery>) -> Json<serde_json::Value> {
    let nearby: Vec<serde_json::Value> = geo::nearest_cities(query.lat, query.lon, 3)
        .into_iter()
        .map(|(city, distance_km)| {
            serde_json::json!({
                "city": city,
                "distance_km": (distance_km * 10.0).round() / 10.0,
            })
        })
        .collect();
    Json(serde_json::json!({"nearby": nearby}))
}

/// WebSocket entry point for a room
pub async fn room_ws(
    State(state): State<Arc<AppState>>,
    Path((city, circle)): Path<(String, String)>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let key = RoomKey::new(&city, &circle);
    ws.on_upgrade(move |socket| handle_socket(socket, state, key))
}

/// Per-connection lifecycle: register, pump frames, clean up exactly once.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, key: RoomKey) {
    let conn = ConnectionId::generate();
    let (tx, mut rx) = mpsc::unbounded_channel();

    {
        let mut registry = state.registry.lock().await;
        registry.register(key.clone(), conn, tx);
    }
    tracing::info!("connection {} registered for {}", conn, key);

    let (mut sender, mut receiver) = socket.split();

    // Writer: drain this connection's outbound queue.
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // Reader: frames are handled strictly in arrival order.
    let reader_state = state.clone();
    let reader_key = key.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => {
                    session::handle_frame(&reader_state, &reader_key, conn, &text).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Whichever half finishes first tears the other down.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    disconnect(&state, &key, conn).await;
}

/// Disconnect cleanup: deregister, clear presence, and refresh the user
/// list for whoever is left. Idempotent against a broadcast having already
/// evicted the connection.
async fn disconnect(state: &AppState, key: &RoomKey, conn: ConnectionId) {
    let room_alive = {
        let mut registry = state.registry.lock().await;
        registry.deregister(key, conn);
        registry.contains(key)
    };

    let users = {
        let mut presence = state.presence.lock().await;
        presence.remove(key, conn);
        room_alive.then(|| UsersFrame::new(presence.names(key)))
    };

    if let Some(users) = users {
        let payload = serde_json::to_string(&users).unwrap();
        broadcast(&state.registry, key, &payload).await;
    }
    tracing::info!("connection {} left {}", conn, key);
}
