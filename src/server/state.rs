//! Shared server state.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::common::time::Clock;
use crate::config::Config;
use crate::history::HistoryStore;

use super::presence::PresenceTracker;
use super::registry::RoomRegistry;

/// Transport handle for one live connection: the write half of its outbound
/// queue. Cloned into broadcast snapshots; a failed send means the
/// connection's writer task is gone and the peer is dead.
pub type OutboundSender = mpsc::UnboundedSender<String>;

/// Shared application state
pub struct AppState {
    /// Which connections belong to which room
    pub registry: Mutex<RoomRegistry>,
    /// Nicknames of live connections, per room
    pub presence: Mutex<PresenceTracker>,
    /// Short-term message log (a no-op store when retention is disabled)
    pub history: Arc<dyn HistoryStore>,
    /// Clock used to stamp chat messages
    pub clock: Arc<dyn Clock>,
    /// Runtime configuration
    pub config: Config,
}

impl AppState {
    pub fn new(history: Arc<dyn HistoryStore>, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            registry: Mutex::new(RoomRegistry::default()),
            presence: Mutex::new(PresenceTracker::default()),
            history,
            clock,
            config,
        }
    }
}
