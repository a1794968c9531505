//! Nickname tracking per room.

use std::collections::HashMap;

use crate::domain::{ConnectionId, RoomKey};

/// Maps each live connection to its current display nickname, scoped per
/// room key. Updated on join and on every chat message (a nickname may
/// change mid-session); cleared explicitly by the session on disconnect.
#[derive(Default)]
pub struct PresenceTracker {
    rooms: HashMap<RoomKey, HashMap<ConnectionId, String>>,
}

impl PresenceTracker {
    /// Upsert the nickname for a connection within a room.
    pub fn set_nick(&mut self, key: RoomKey, conn: ConnectionId, nick: String) {
        self.rooms.entry(key).or_default().insert(conn, nick);
    }

    /// Forget a connection; no-op when it was never tracked.
    pub fn remove(&mut self, key: &RoomKey, conn: ConnectionId) {
        if let Some(nicks) = self.rooms.get_mut(key) {
            nicks.remove(&conn);
            if nicks.is_empty() {
                self.rooms.remove(key);
            }
        }
    }

    /// Current nicknames in a room, sorted for stable output.
    pub fn names(&self, key: &RoomKey) -> Vec<String> {
        let mut names: Vec<String> = self
            .rooms
            .get(key)
            .map(|nicks| nicks.values().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Number of tracked connections in a room.
    pub fn count(&self, key: &RoomKey) -> usize {
        self.rooms.get(key).map_or(0, HashMap::len)
    }
}
