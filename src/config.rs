//! Environment-style runtime configuration.

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hours of message retention; 0 disables persistence entirely.
    pub retention_hours: i64,
    /// City preselected by the UI when no geolocation is available.
    pub default_city: String,
    /// Allowed CORS origins; empty disables the CORS layer.
    pub cors_origins: Vec<String>,
    /// SQLite database URL for the history store.
    pub database_url: String,
}

impl Config {
    /// Read configuration from the environment (and `.env` when present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            retention_hours: parse_retention(std::env::var("RETENTION_HOURS").ok().as_deref()),
            default_city: std::env::var("DEFAULT_CITY")
                .unwrap_or_else(|_| "konigsbrunn".to_string())
                .to_lowercase(),
            cors_origins: parse_origins(std::env::var("CORS_ORIGINS").ok().as_deref()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:square.db?mode=rwc".to_string()),
        }
    }

    pub fn retention_enabled(&self) -> bool {
        self.retention_hours > 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retention_hours: 0,
            default_city: "konigsbrunn".to_string(),
            cors_origins: Vec::new(),
            database_url: "sqlite:square.db?mode=rwc".to_string(),
        }
    }
}

/// Parse the retention window; anything unusable or negative means disabled.
fn parse_retention(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(0)
        .max(0)
}

/// Split a comma separated origin list, dropping empty entries.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
