//! Short-term message retention.
//!
//! The store keeps a bounded, time-windowed log of chat messages per room
//! key, used to seed the page a client sees before its WebSocket is up.
//! Retention is configured in whole hours; zero disables persistence and
//! every operation becomes a silent no-op.

mod sqlite;

pub use sqlite::SqliteHistory;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ChatRecord, RoomKey};

/// Number of seed messages served to a newly joined client.
pub const SEED_LIMIT: u32 = 50;

/// History-store errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Underlying storage failure; propagated to the caller, never hidden
    /// behind the disabled-by-config no-op.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable, time-limited message log.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one message to the log.
    async fn record(&self, key: &RoomKey, message: &ChatRecord) -> Result<(), HistoryError>;

    /// Up to `limit` messages for `key` inside the retention window, oldest
    /// first. Expired records (for any key) are pruned before the select.
    async fn recent(&self, key: &RoomKey, limit: u32) -> Result<Vec<ChatRecord>, HistoryError>;
}

/// Store used when retention is disabled: records nothing, returns nothing.
pub struct NoopHistory;

#[async_trait]
impl HistoryStore for NoopHistory {
    async fn record(&self, _key: &RoomKey, _message: &ChatRecord) -> Result<(), HistoryError> {
        Ok(())
    }

    async fn recent(&self, _key: &RoomKey, _limit: u32) -> Result<Vec<ChatRecord>, HistoryError> {
        Ok(Vec::new())
    }
}
