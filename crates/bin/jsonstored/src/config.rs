//! Runtime settings for `jsonstored`.
//!
//! Read from an optional `jsonstore.toml` in the working directory, then
//! overridden from `JSONSTORE_*` environment variables (and `RUST_LOG` for
//! the log filter). Missing keys fall back to the `DEFAULT_*` constants.

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "jsonstore.toml";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite:jsonstore.db?mode=rwc";
const DEFAULT_LOG_FILTER: &str = "jsonstored=info,jsonstore=info,tower_http=debug";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Listen,
    pub database: Storage,
    pub logging: Logging,
}

/// `[server]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Listen {
    pub host: String,
    pub port: u16,
}

/// `[database]` table. `url` is anything `sqlx` accepts for `SQLite`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub url: String,
}

/// `[logging]` table. `filter` uses `EnvFilter` directive syntax.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub filter: String,
}

impl Default for Listen {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.into(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Config {
    /// Resolve settings from [`CONFIG_FILE`] and the process environment.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed, or when the
    /// resolved settings are unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
    }

    fn load_from(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        config.merge_env(lookup);
        config.check()?;
        Ok(config)
    }

    /// Later entries win: `JSONSTORE_BIND` over `JSONSTORE_HOST`/`JSONSTORE_PORT`,
    /// `RUST_LOG` over `JSONSTORE_LOG`. Unparseable ports are ignored.
    fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let port = |raw: &str| raw.parse::<u16>().ok();

        if let Some(host) = lookup("JSONSTORE_HOST") {
            self.server.host = host;
        }
        if let Some(p) = lookup("JSONSTORE_PORT").as_deref().and_then(port) {
            self.server.port = p;
        }
        if let Some(bind) = lookup("JSONSTORE_BIND")
            && let Some((host, raw_port)) = bind.rsplit_once(':')
        {
            host.clone_into(&mut self.server.host);
            if let Some(p) = port(raw_port) {
                self.server.port = p;
            }
        }
        if let Some(url) = lookup("JSONSTORE_DATABASE_URL") {
            self.database.url = url;
        }
        for key in ["JSONSTORE_LOG", "RUST_LOG"] {
            if let Some(filter) = lookup(key) {
                self.logging.filter = filter;
            }
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        match self.server.port {
            0 => Err(ConfigError::Validation("server.port cannot be 0")),
            _ => Ok(()),
        }
    }

    /// Listener address as `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        let Listen { host, port } = &self.server;
        format!("{host}:{port}")
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn with_env(pairs: &[(&str, &str)]) -> Config {
        let mut config = Config::default();
        config.merge_env(vars(pairs));
        config
    }

    #[test]
    fn should_fall_back_to_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn should_use_defaults_when_file_absent() {
        let config = Config::load_from(Path::new("no-such-jsonstore.toml"), no_env).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_read_every_table_from_toml() {
        let config: Config = toml::from_str(
            r#"
            server = { host = "127.0.0.1", port = 9090 }
            database = { url = "sqlite:other.db" }
            logging = { filter = "trace" }
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.database_url(), "sqlite:other.db");
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_fill_missing_keys_from_defaults() {
        let config: Config = toml::from_str("[database]\nurl = 'sqlite::memory:'").unwrap();
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.host, DEFAULT_HOST);
    }

    #[test]
    fn should_fail_on_malformed_toml() {
        assert!(toml::from_str::<Config>("server = [").is_err());
    }

    #[test]
    fn should_override_file_values_from_env() {
        let config = with_env(&[
            ("JSONSTORE_HOST", "127.0.0.1"),
            ("JSONSTORE_PORT", "8081"),
            ("JSONSTORE_DATABASE_URL", "sqlite::memory:"),
            ("JSONSTORE_LOG", "warn"),
        ]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_bind_over_host_and_port() {
        let config = with_env(&[
            ("JSONSTORE_HOST", "10.0.0.1"),
            ("JSONSTORE_PORT", "1"),
            ("JSONSTORE_BIND", "127.0.0.1:4000"),
        ]);
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn should_keep_port_when_env_port_unparseable() {
        let config = with_env(&[("JSONSTORE_PORT", "http")]);
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn should_let_rust_log_win_over_jsonstore_log() {
        let config = with_env(&[("JSONSTORE_LOG", "warn"), ("RUST_LOG", "trace")]);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_refuse_port_zero() {
        let config = with_env(&[("JSONSTORE_PORT", "0")]);
        assert!(matches!(config.check(), Err(ConfigError::Validation(_))));
        assert!(Config::default().check().is_ok());
    }
}
