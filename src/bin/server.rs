//! Room-scoped chat relay server.
//!
//! Clients connect to `/ws/{city}/{circle}` and exchange chat, join and
//! typing frames with everyone in the same room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use town_square_rs::{
    common::{
        logger::setup_logger,
        time::{Clock, SystemClock},
    },
    config::Config,
    history::{HistoryStore, NoopHistory, SqliteHistory},
    server::{AppState, run_server},
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Room-scoped chat relay with WebSocket broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = Config::from_env();
    tracing::info!("default city: {}", config.default_city);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Select the history store: SQLite when retention is enabled, a no-op
    // store otherwise.
    let history: Arc<dyn HistoryStore> = if config.retention_enabled() {
        match SqliteHistory::connect(&config.database_url, config.retention_hours, clock.clone())
            .await
        {
            Ok(store) => {
                tracing::info!(
                    "message retention enabled: {}h via {}",
                    config.retention_hours,
                    config.database_url
                );
                Arc::new(store)
            }
            Err(e) => {
                tracing::error!("failed to open history store: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        tracing::info!("message retention disabled");
        Arc::new(NoopHistory)
    };

    let state = Arc::new(AppState::new(history, clock, config));
    if let Err(e) = run_server(&args.host, args.port, state).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
