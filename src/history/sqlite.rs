//! SQLite-backed history store.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::common::time::Clock;
use crate::domain::{ChatRecord, RoomKey};

use super::{HistoryError, HistoryStore};

/// Message log persisted to SQLite with a sliding retention window.
pub struct SqliteHistory {
    pool: SqlitePool,
    retention_secs: i64,
    clock: Arc<dyn Clock>,
}

impl SqliteHistory {
    /// Open the database behind `database_url`, creating the message table
    /// and its index when missing.
    pub async fn connect(
        database_url: &str,
        retention_hours: i64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, HistoryError> {
        // SQLite serializes writers anyway; a single pooled connection also
        // keeps `sqlite::memory:` databases coherent across calls.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room TEXT NOT NULL,
                circle TEXT NOT NULL,
                nick TEXT NOT NULL,
                text TEXT NOT NULL,
                ts INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_room_circle_ts ON messages(room, circle, ts)")
            .execute(&pool)
            .await?;

        Ok(Self {
            pool,
            retention_secs: retention_hours * 3600,
            clock,
        })
    }

    fn cutoff(&self) -> i64 {
        self.clock.now_utc_secs() - self.retention_secs
    }
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    async fn record(&self, key: &RoomKey, message: &ChatRecord) -> Result<(), HistoryError> {
        sqlx::query("INSERT INTO messages (room, circle, nick, text, ts) VALUES (?, ?, ?, ?, ?)")
            .bind(key.room())
            .bind(key.circle())
            .bind(&message.nick)
            .bind(&message.text)
            .bind(message.ts)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn recent(&self, key: &RoomKey, limit: u32) -> Result<Vec<ChatRecord>, HistoryError> {
        let cutoff = self.cutoff();

        // Expired rows are dropped for every room, not just the one being
        // read; pruning piggybacks on reads instead of a background sweep.
        sqlx::query("DELETE FROM messages WHERE ts < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT nick, text, ts FROM messages
             WHERE room = ? AND circle = ? AND ts >= ?
             ORDER BY ts DESC LIMIT ?",
        )
        .bind(key.room())
        .bind(key.circle())
        .bind(cutoff)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        // Newest-first from the query, oldest-first for display.
        Ok(rows
            .into_iter()
            .rev()
            .map(|(nick, text, ts)| ChatRecord { nick, text, ts })
            .collect())
    }
}
