use std::env;
use std::net::SocketAddr;

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

pub mod security;

pub use security::create_security_headers_layer;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_anon_key: String,
    pub bind_addr: SocketAddr,
    pub production: bool,
    pub utc_offset: FixedOffset,
}

/// Settings the request handlers need at runtime.
#[derive(Debug, Clone)]
pub struct PortalSettings {
    /// Offset used to read `datetime-local` inputs and to display event times.
    pub utc_offset: FixedOffset,
    pub secure_cookies: bool,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            secure_cookies: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("BACKEND_URL"))?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let backend_anon_key = lookup("BACKEND_ANON_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("BACKEND_ANON_KEY"))?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let production = lookup("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        let offset_minutes = match lookup("PORTAL_UTC_OFFSET_MINUTES") {
            Some(raw) => raw.trim().parse::<i32>().map_err(|e| ConfigError::Invalid {
                name: "PORTAL_UTC_OFFSET_MINUTES",
                reason: e.to_string(),
            })?,
            None => 0,
        };
        let utc_offset =
            FixedOffset::east_opt(offset_minutes * 60).ok_or(ConfigError::Invalid {
                name: "PORTAL_UTC_OFFSET_MINUTES",
                reason: format!("{} minutes is out of range", offset_minutes),
            })?;

        Ok(Self {
            backend_url,
            backend_anon_key,
            bind_addr,
            production,
            utc_offset,
        })
    }

    pub fn portal_settings(&self) -> PortalSettings {
        PortalSettings {
            utc_offset: self.utc_offset,
            secure_cookies: self.production,
        }
    }
}
