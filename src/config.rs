//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `5000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `CLUBS_PATH` — clubs file (default: `"data/clubs.json"`)
/// - `COMPETITIONS_PATH` — competitions file (default: `"data/competitions.json"`)
/// - `PERSIST_CHANGES` — write records back after each booking (default: `false`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub clubs_path: PathBuf,
    pub competitions_path: PathBuf,
    pub persist_changes: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            clubs_path: lookup("CLUBS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.clubs_path),
            competitions_path: lookup("COMPETITIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.competitions_path),
            persist_changes: lookup("PERSIST_CHANGES")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.persist_changes),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            clubs_path: PathBuf::from("data/clubs.json"),
            competitions_path: PathBuf::from("data/competitions.json"),
            persist_changes: false,
        }
    }
}
