//! Room-scoped chat relay.
//!
//! Clients join a `(city, circle)` room over a WebSocket, exchange short text
//! messages, and receive live updates (messages, presence, typing indicators)
//! broadcast to everyone else in the same room. Messages are optionally
//! retained for a short, configurable time window and replayed to newly
//! joined clients.

pub mod common;
pub mod config;
pub mod domain;
pub mod geo;
pub mod history;
pub mod sanitize;
pub mod server;
