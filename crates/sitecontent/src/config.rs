use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path prefix stripped before routing (default: "/content")
    pub route_prefix: String,
    /// Path to SQLite database file (default: "sitecontent.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Seed demo content when the store is first opened. `None` leaves the
    /// choice to the backend: in-memory seeds, SQLite does not.
    pub seed_demo_content: Option<bool>,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ROUTE_PREFIX` - Route prefix (default: "/content")
    /// - `SQLITE_PATH` - SQLite database path (default: "sitecontent.db")
    /// - `SEED_DEMO_CONTENT` - "true" or "false" (default: backend dependent)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            route_prefix: env::var("ROUTE_PREFIX").unwrap_or_else(|_| "/content".to_string()),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "sitecontent.db".to_string()),
            seed_demo_content: env::var("SEED_DEMO_CONTENT")
                .ok()
                .and_then(|v| parse_flag(&v)),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Whether to seed demo content, given the backend's default.
    pub fn seed_or(&self, backend_default: bool) -> bool {
        self.seed_demo_content.unwrap_or(backend_default)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
