//! Server configuration.
//!
//! Values resolve in layers: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_rules::Player;
use tracing::{debug, info, instrument};

/// Config file read when `--config` isn't given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Configuration for the game server and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database path.
    #[serde(default = "default_database_url")]
    database_url: String,

    /// Player who moves first in new games.
    #[serde(default = "default_starting_player")]
    starting_player: Player,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "tictactoe.db".to_string()
}

fn default_starting_player() -> Player {
    Player::One
}

fn default_log_filter() -> String {
    "info,tictactoe_server=debug".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            starting_player: default_starting_player(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(database_url = %config.database_url, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file layer and applies the process environment on top.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unreadable files or invalid values.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Overrides fields from environment variables looked up through `var`:
    /// `HTTP_HOST`, `HTTP_PORT`, `DATABASE_URL`, `STARTING_PLAYER`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an invalid value.
    #[instrument(skip(self, var))]
    pub fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(host) = var("HTTP_HOST") {
            self.host = host;
        }
        if let Some(port) = var("HTTP_PORT") {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid HTTP_PORT '{}': {}", port, e)))?;
        }
        if let Some(url) = var("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(player) = var("STARTING_PLAYER") {
            self.starting_player = player.parse().map_err(|e| {
                ConfigError::new(format!("Invalid STARTING_PLAYER '{}': {}", player, e))
            })?;
        }
        Ok(self)
    }

    /// Overrides the bind address.
    pub fn with_address(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Overrides the database path.
    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        if let Some(url) = database_url {
            self.database_url = url;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080\nstarting_player = 2").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.port(), 8080);
        assert_eq!(*config.starting_player(), Player::Two);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.database_url(), "tictactoe.db");
    }

    #[test]
    fn test_invalid_player_in_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "starting_player = 3").unwrap();
        assert!(ServerConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = ServerConfig::load(Some(Path::new("/nonexistent/tictactoe.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HTTP_PORT", "9000"),
            ("DATABASE_URL", "/tmp/games.db"),
            ("STARTING_PLAYER", "2"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::default()
            .with_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(*config.port(), 9000);
        assert_eq!(config.database_url(), "/tmp/games.db");
        assert_eq!(*config.starting_player(), Player::Two);
        assert_eq!(config.host(), "127.0.0.1");
    }

    #[test]
    fn test_bad_env_port() {
        let result = ServerConfig::default().with_env(|key| {
            (key == "HTTP_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override() {
        let config = ServerConfig::default()
            .with_address(Some("0.0.0.0".to_string()), None)
            .with_database_url(Some(":memory:".to_string()));
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(*config.port(), 3000);
        assert_eq!(config.database_url(), ":memory:");
    }
}
