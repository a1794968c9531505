//! Room membership registry.
//!
//! Maps a room key to the set of currently connected clients. An entry
//! exists iff at least one connection is registered for it; the entry is
//! dropped the moment its member set empties.

use std::collections::HashMap;

use crate::domain::{ConnectionId, RoomKey};

use super::state::OutboundSender;

#[derive(Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomKey, HashMap<ConnectionId, OutboundSender>>,
}

impl RoomRegistry {
    /// Add a connection to a room, creating the room entry on first use.
    /// Registering the same connection twice does not duplicate the member;
    /// it only refreshes the stored transport handle.
    pub fn register(&mut self, key: RoomKey, conn: ConnectionId, sender: OutboundSender) {
        self.rooms.entry(key).or_default().insert(conn, sender);
    }

    /// Remove a connection; drops the room entry when it was the last member.
    pub fn deregister(&mut self, key: &RoomKey, conn: ConnectionId) {
        if let Some(members) = self.rooms.get_mut(key) {
            members.remove(&conn);
            if members.is_empty() {
                self.rooms.remove(key);
            }
        }
    }

    /// Snapshot of the current members of a room; empty when the room has
    /// no entry.
    pub fn members(&self, key: &RoomKey) -> Vec<(ConnectionId, OutboundSender)> {
        self.rooms
            .get(key)
            .map(|members| {
                members
                    .iter()
                    .map(|(conn, sender)| (*conn, sender.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether any connection is registered for `key`.
    pub fn contains(&self, key: &RoomKey) -> bool {
        self.rooms.contains_key(key)
    }

    /// Number of live connections in a room.
    pub fn member_count(&self, key: &RoomKey) -> usize {
        self.rooms.get(key).map_or(0, HashMap::len)
    }
}
