//! Server configuration, persisted as TOML.
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! `BOOKSTORE_*` environment variables. Command-line flags are applied last
//! by the binaries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(bookstore::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(bookstore::config::parse),
        help("Check the TOML syntax and field names in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("invalid value for {name}: \"{value}\"")]
    #[diagnostic(
        code(bookstore::config::invalid_env),
        help("{name} must be a valid {expected}.")
    )]
    InvalidEnv {
        name: String,
        value: String,
        expected: String,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Settings for the HTTP server and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// RDF/XML catalog file.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Directory of front-end files served for unmatched paths.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Chatbot endpoint notified after each book write.
    #[serde(default = "default_notify_url")]
    pub notify_url: String,
    #[serde(default = "default_notify_enabled")]
    pub notify_enabled: bool,
    #[serde(default = "default_notify_timeout_secs")]
    pub notify_timeout_secs: u64,
}

fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_store_path() -> PathBuf {
    PathBuf::from("books_data.rdf")
}
fn default_notify_url() -> String {
    "http://localhost:5000/reload".into()
}
fn default_notify_enabled() -> bool {
    true
}
fn default_notify_timeout_secs() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            store_path: default_store_path(),
            static_dir: None,
            notify_url: default_notify_url(),
            notify_enabled: default_notify_enabled(),
            notify_timeout_secs: default_notify_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    fn from_toml(content: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Defaults, overlaid with `path` when given, overlaid with the environment.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.with_env(|name| std::env::var(name).ok())
    }

    /// Apply `BOOKSTORE_BIND`, `BOOKSTORE_PORT`, `BOOKSTORE_STORE` and
    /// `BOOKSTORE_NOTIFY_URL` as returned by `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        if let Some(bind) = lookup("BOOKSTORE_BIND") {
            self.bind = bind;
        }
        if let Some(port) = lookup("BOOKSTORE_PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "BOOKSTORE_PORT".into(),
                value: port.clone(),
                expected: "port number (0-65535)".into(),
            })?;
        }
        if let Some(store) = lookup("BOOKSTORE_STORE") {
            self.store_path = PathBuf::from(store);
        }
        if let Some(url) = lookup("BOOKSTORE_NOTIFY_URL") {
            self.notify_url = url;
        }
        Ok(self)
    }

    /// `bind:port` socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_deployment() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.store_path, PathBuf::from("books_data.rdf"));
        assert_eq!(config.notify_url, "http://localhost:5000/reload");
        assert!(config.notify_enabled);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ServerConfig::from_toml(
            "port = 9000\nstore_path = \"/srv/books.rdf\"\nnotify_enabled = false\n",
            "inline",
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.store_path, PathBuf::from("/srv/books.rdf"));
        assert!(!config.notify_enabled);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.notify_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ServerConfig::from_toml("port = \"many\"", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let config = ServerConfig::default()
            .with_env(|name| match name {
                "BOOKSTORE_PORT" => Some("8200".into()),
                "BOOKSTORE_STORE" => Some("data/catalog.rdf".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.port, 8200);
        assert_eq!(config.store_path, PathBuf::from("data/catalog.rdf"));
    }

    #[test]
    fn invalid_port_in_env_is_rejected() {
        let err = ServerConfig::default()
            .with_env(|name| (name == "BOOKSTORE_PORT").then(|| "http".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bookstore.toml");
        std::fs::write(&path, "bind = \"127.0.0.1\"\n").unwrap();
        assert_eq!(ServerConfig::load(&path).unwrap().bind, "127.0.0.1");
    }
}
