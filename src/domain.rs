//! Core value types shared across the relay.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sanitize::sanitize;

/// Composite room address: a city (or geographic bucket) crossed with a
/// circle (sub-topic / age group).
///
/// Both components are sanitized and lower-cased on construction; two keys
/// are equal iff their normalized components match. The key is the sole
/// addressing unit for registry, presence and broadcast operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomKey {
    room: String,
    circle: String,
}

impl RoomKey {
    pub fn new(room: &str, circle: &str) -> Self {
        Self {
            room: sanitize(room).to_lowercase(),
            circle: sanitize(circle).to_lowercase(),
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn circle(&self) -> &str {
        &self.circle
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.room, self.circle)
    }
}

/// Identity of one live connection.
///
/// Generated server-side; the transport handle is stored alongside it in the
/// registry rather than being used as a map key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat message as persisted and re-served to newly joined clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub nick: String,
    pub text: String,
    /// Unix timestamp in UTC (seconds)
    pub ts: i64,
}
