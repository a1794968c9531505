//! Per-connection session logic.
//!
//! One session per live connection. Inbound frames are classified and
//! handled in arrival order; the registration and disconnect lifecycle
//! around the frame loop lives in the WebSocket handler.

use crate::domain::{ChatRecord, ConnectionId, RoomKey};
use crate::sanitize::{nick_or_anon, sanitize};

use super::broadcast::broadcast;
use super::frames::{ChatFrame, InboundFrame, RawFrame, TypingFrame, UsersFrame, classify};
use super::state::AppState;

/// Handle one inbound text frame from `conn`.
pub async fn handle_frame(state: &AppState, key: &RoomKey, conn: ConnectionId, raw: &str) {
    let Ok(frame) = serde_json::from_str::<RawFrame>(raw) else {
        tracing::debug!("dropping undecodable frame on {}", key);
        return;
    };

    match classify(frame) {
        InboundFrame::Join { nick } => handle_join(state, key, conn, &nick).await,
        InboundFrame::Typing { nick, typing } => handle_typing(state, key, &nick, typing).await,
        InboundFrame::Chat { nick, text } => handle_chat(state, key, conn, &nick, &text).await,
    }
}

/// join: announce (or change) a nickname, then refresh everyone's user list.
async fn handle_join(state: &AppState, key: &RoomKey, conn: ConnectionId, nick: &str) {
    let nick = nick_or_anon(nick);
    tracing::debug!("{} joined {} as '{}'", conn, key, nick);

    let users = {
        let mut presence = state.presence.lock().await;
        presence.set_nick(key.clone(), conn, nick);
        UsersFrame::new(presence.names(key))
    };
    let payload = serde_json::to_string(&users).unwrap();
    broadcast(&state.registry, key, &payload).await;
}

/// typing: relay the indicator verbatim; no state changes.
async fn handle_typing(state: &AppState, key: &RoomKey, nick: &str, typing: bool) {
    let nick = sanitize(nick);
    let payload = serde_json::to_string(&TypingFrame::new(&nick, typing)).unwrap();
    broadcast(&state.registry, key, &payload).await;
}

/// chat: persist and fan out a message, then refresh everyone's user list.
async fn handle_chat(state: &AppState, key: &RoomKey, conn: ConnectionId, nick: &str, text: &str) {
    let nick = nick_or_anon(nick);
    let text = sanitize(text);
    if text.is_empty() {
        // Nothing left after sanitizing: drop the frame, not the session.
        return;
    }

    let ts = state.clock.now_utc_secs();
    {
        let mut presence = state.presence.lock().await;
        presence.set_nick(key.clone(), conn, nick.clone());
    }

    // Persistence is best-effort relative to live delivery: a failed write
    // is logged and the message still goes out.
    let record = ChatRecord {
        nick: nick.clone(),
        text: text.clone(),
        ts,
    };
    if let Err(e) = state.history.record(key, &record).await {
        tracing::error!("failed to persist message for {}: {}", key, e);
    }

    let payload = serde_json::to_string(&ChatFrame {
        nick: &nick,
        text: &text,
        ts,
    })
    .unwrap();
    broadcast(&state.registry, key, &payload).await;

    // Presence did not necessarily change, but clients rely on the
    // refreshed list arriving after every message.
    let users = UsersFrame::new(state.presence.lock().await.names(key));
    let payload = serde_json::to_string(&users).unwrap();
    broadcast(&state.registry, key, &payload).await;
}
