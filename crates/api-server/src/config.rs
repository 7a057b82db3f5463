//! Environment-driven server configuration

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = ".taskdash-data";
pub const DEFAULT_REST_PORT: u16 = 8081;
pub const DEFAULT_SOCKET_PORT: u16 = 8080;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub rest_port: u16,
    pub socket_port: u16,
    /// Create a "General" category when the store has none
    pub seed_default_category: bool,
    /// Also keep a copy of every export here
    pub export_archive_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rest_port: DEFAULT_REST_PORT,
            socket_port: DEFAULT_SOCKET_PORT,
            seed_default_category: true,
            export_archive_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process env.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            data_dir: var("TD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            rest_port: port(&var, "TD_REST_PORT", defaults.rest_port)?,
            socket_port: port(&var, "TD_SOCKET_PORT", defaults.socket_port)?,
            seed_default_category: flag(
                var("TD_SEED_DEFAULT_CATEGORY"),
                defaults.seed_default_category,
            ),
            export_archive_dir: var("TD_EXPORT_ARCHIVE_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

fn port(var: &impl Fn(&str) -> Option<String>, name: &str, default: u16) -> Result<u16> {
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("{} must be a port number, got {:?}", name, raw)),
        None => Ok(default),
    }
}
