//! WebSocket chat relay implementation.

pub mod broadcast;
pub mod frames;
mod handler;
pub mod presence;
pub mod registry;
mod runner;
mod session;
mod signal;
pub mod state;

pub use runner::{build_router, run_server};
pub use state::AppState;
