//! Room-wide fan-out.

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomKey};

use super::registry::RoomRegistry;

/// Deliver a payload to every connection registered for `key`.
///
/// Delivery is two-phase: the full member snapshot is attempted first, then
/// every connection that failed is deregistered. One dead peer never aborts
/// delivery to the rest, and there is no retry within the call. Sends go
/// into per-connection queues drained by each connection's writer task, so
/// a stalled peer only backs up its own queue.
///
/// Returns the number of successful deliveries.
pub async fn broadcast(registry: &Mutex<RoomRegistry>, key: &RoomKey, payload: &str) -> usize {
    let members = registry.lock().await.members(key);

    let mut dead: Vec<ConnectionId> = Vec::new();
    let mut delivered = 0;
    for (conn, sender) in &members {
        if sender.send(payload.to_owned()).is_err() {
            dead.push(*conn);
        } else {
            delivered += 1;
        }
    }

    if !dead.is_empty() {
        let mut registry = registry.lock().await;
        for conn in &dead {
            tracing::warn!("evicting unreachable connection {} from {}", conn, key);
            registry.deregister(key, *conn);
        }
    }

    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::state::OutboundSender;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn channel() -> (OutboundSender, UnboundedReceiver<String>) {
        mpsc::unbounded_channel()
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_member() {
        // given (precondition):
        let registry = Mutex::new(RoomRegistry::default());
        let key = RoomKey::new("central", "music");
        let (tx_a, mut rx_a) = channel();
        let (tx_b, mut rx_b) = channel();
        {
            let mut reg = registry.lock().await;
            reg.register(key.clone(), ConnectionId::generate(), tx_a);
            reg.register(key.clone(), ConnectionId::generate(), tx_b);
        }

        // when (operation):
        let delivered = broadcast(&registry, &key, "hello").await;

        // then (expected result):
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await.as_deref(), Some("hello"));
        assert_eq!(rx_b.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_dead_member_is_evicted_without_aborting_delivery() {
        // given (precondition): three members, the middle one already gone
        let registry = Mutex::new(RoomRegistry::default());
        let key = RoomKey::new("central", "music");
        let (tx_a, mut rx_a) = channel();
        let (tx_dead, rx_dead) = channel();
        let (tx_b, mut rx_b) = channel();
        let dead_conn = ConnectionId::generate();
        {
            let mut reg = registry.lock().await;
            reg.register(key.clone(), ConnectionId::generate(), tx_a);
            reg.register(key.clone(), dead_conn, tx_dead);
            reg.register(key.clone(), ConnectionId::generate(), tx_b);
        }
        drop(rx_dead);

        // when (operation):
        let delivered = broadcast(&registry, &key, "hello").await;

        // then (expected result): two deliveries, one eviction, live
        // members untouched
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await.as_deref(), Some("hello"));
        assert_eq!(rx_b.recv().await.as_deref(), Some("hello"));
        assert_eq!(registry.lock().await.member_count(&key), 2);
    }

    #[tokio::test]
    async fn test_all_members_dead_drops_the_room_entry() {
        // given (precondition):
        let registry = Mutex::new(RoomRegistry::default());
        let key = RoomKey::new("central", "music");
        let (tx_a, rx_a) = channel();
        let (tx_b, rx_b) = channel();
        {
            let mut reg = registry.lock().await;
            reg.register(key.clone(), ConnectionId::generate(), tx_a);
            reg.register(key.clone(), ConnectionId::generate(), tx_b);
        }
        drop(rx_a);
        drop(rx_b);

        // when (operation):
        let delivered = broadcast(&registry, &key, "hello").await;

        // then (expected result): nobody reached, entry gone entirely
        assert_eq!(delivered, 0);
        assert!(!registry.lock().await.contains(&key));
    }

    #[tokio::test]
    async fn test_broadcast_to_absent_room_is_a_noop() {
        // given (precondition):
        let registry = Mutex::new(RoomRegistry::default());
        let key = RoomKey::new("central", "music");

        // when (operation):
        let delivered = broadcast(&registry, &key, "hello").await;

        // then (expected result):
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_broadcast_does_not_cross_rooms() {
        // given (precondition):
        let registry = Mutex::new(RoomRegistry::default());
        let music = RoomKey::new("central", "music");
        let chess = RoomKey::new("central", "chess");
        let (tx_music, mut rx_music) = channel();
        let (tx_chess, mut rx_chess) = channel();
        {
            let mut reg = registry.lock().await;
            reg.register(music.clone(), ConnectionId::generate(), tx_music);
            reg.register(chess.clone(), ConnectionId::generate(), tx_chess);
        }

        // when (operation):
        broadcast(&registry, &music, "tune").await;

        // then (expected result):
        assert_eq!(rx_music.recv().await.as_deref(), Some("tune"));
        assert!(rx_chess.try_recv().is_err());
    }
}
