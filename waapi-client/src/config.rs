//! Connection settings, loaded from an embedded default with an optional
//! user override file.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    connection: ConnectionConfig,
}

#[derive(Deserialize, Default)]
struct ConnectionConfig {
    address: Option<String>,
    read_timeout_ms: Option<u64>,
}

pub struct Config {
    connection: ConnectionConfig,
}

impl Config {
    pub fn load() -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge_connection(&mut base.connection, user.connection),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            connection: base.connection,
        }
    }

    /// Address of the remote API server.
    pub fn address(&self) -> &str {
        self.connection.address.as_deref().unwrap_or("127.0.0.1:8080")
    }

    /// Per-call read timeout; `None` means wait indefinitely.
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.connection.read_timeout_ms {
            None | Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
        }
    }
}

fn merge_connection(base: &mut ConnectionConfig, user: ConnectionConfig) {
    if user.address.is_some() {
        base.address = user.address;
    }
    if user.read_timeout_ms.is_some() {
        base.read_timeout_ms = user.read_timeout_ms;
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("waapi-helpers").join("config.toml"))
}
