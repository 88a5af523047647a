//! Configuration management for the Bookmarks service
//!
//! Loads settings from TOML file at ~/.bookmarks/config.toml

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Value of `BOOKMARKS_ENV` that turns off the console log sink
pub const PRODUCTION_ENV: &str = "production";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Log sink configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Bookmark store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server host (default: 127.0.0.1 - localhost only)
    #[serde(default = "default_host")]
    pub host: String,

    /// Base address used to build `Location` headers for created bookmarks
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_public_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            host: default_host(),
            public_url: default_public_url(),
        }
    }
}

/// Log sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    #[serde(default = "default_level")]
    pub level: String,

    /// File sink; always written
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Mirror events to the console
    #[serde(default = "default_true")]
    pub console: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("info.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            file: default_log_file(),
            console: true,
        }
    }
}

/// Bookmark store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Optional JSON file of bookmarks loaded at startup
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded_path = expand_path(path.as_ref());

        if !expanded_path.exists() {
            return Err(CoreError::Config(format!(
                "Configuration file not found: {}",
                expanded_path.display()
            )));
        }

        let content = std::fs::read_to_string(&expanded_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(".bookmarks").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".bookmarks/config.toml"))
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> SocketAddr {
        use std::net::ToSocketAddrs;

        format!("{}:{}", self.server.host, self.server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], self.server.port)))
    }

    /// Public base address with any trailing slash removed
    pub fn public_url(&self) -> String {
        self.server.public_url.trim_end_matches('/').to_string()
    }

    /// Log file path, expanding ~ if present
    pub fn log_file(&self) -> PathBuf {
        expand_path(&self.logging.file)
    }

    /// Seed file path, expanding ~ if present
    pub fn seed_file(&self) -> Option<PathBuf> {
        self.store.seed_file.as_deref().map(expand_path)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("BOOKMARKS_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("BOOKMARKS_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(url) = var("BOOKMARKS_PUBLIC_URL") {
            self.server.public_url = url;
        }
        if let Some(file) = var("BOOKMARKS_LOG_FILE") {
            self.logging.file = PathBuf::from(file);
        }
        if var("BOOKMARKS_ENV").as_deref() == Some(PRODUCTION_ENV) {
            self.logging.console = false;
        }
    }

    /// Create a default configuration file at the given path
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let content = r#"# Bookmarks Service Configuration

[server]
# Port to listen on (default: 8000)
port = 8000

# Host to bind to
host = "127.0.0.1"

# Base address for Location headers of created bookmarks
public_url = "http://localhost:8000"

[logging]
# Level for bookmark events (RUST_LOG takes precedence when set)
level = "info"

# JSON log file, always written
file = "info.log"

# Mirror logs to the console. BOOKMARKS_ENV=production turns this off.
console = true

[store]
# JSON array of bookmarks to load at startup
# seed_file = "~/.bookmarks/seed.json"
"#;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Expand ~ to home directory in paths
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.public_url, "http://localhost:8000");
        assert_eq!(config.logging.file, PathBuf::from("info.log"));
        assert!(config.logging.console);
        assert!(config.store.seed_file.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
port = 9000
host = "0.0.0.0"
public_url = "https://links.example.com/"

[logging]
console = false
file = "/var/log/bookmarks.log"

[store]
seed_file = "seed.json"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.public_url(), "https://links.example.com");
        assert!(!config.logging.console);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.seed_file(), Some(PathBuf::from("seed.json")));
    }

    #[test]
    fn test_production_env_disables_console() {
        let env: HashMap<&str, &str> = [
            ("BOOKMARKS_ENV", "production"),
            ("BOOKMARKS_SERVER_PORT", "8123"),
            ("BOOKMARKS_LOG_FILE", "prod.log"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert!(!config.logging.console);
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.logging.file, PathBuf::from("prod.log"));
    }

    #[test]
    fn test_non_production_env_keeps_console() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "BOOKMARKS_ENV").then(|| "development".to_string()));
        assert!(config.logging.console);
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "BOOKMARKS_SERVER_PORT").then(|| "nope".to_string()));
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_create_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::create_default(&path).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(config.logging.console);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
