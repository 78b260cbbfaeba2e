//! Server configuration loaded from environment variables.
//!
//! - `POS_BIND_ADDR`: interface to listen on (default `127.0.0.1`)
//! - `POS_PORT`: port to listen on (default `3000`)
//! - `POS_STATIC_DIR`: directory served for every non-API path (default: working directory)
//! - `POS_MANIFEST_PATH`: ticket log file (default `manifest.json`)
//! - `POS_ALLOWED_ORIGIN`: origin allowed to call the API cross-origin (default `http://localhost:8080`)
//!
//! Empty variables are treated as unset.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = ".";
const DEFAULT_MANIFEST_PATH: &str = "manifest.json";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("POS_PORT must be a port number, got {0:?}")]
    InvalidPort(String),
    #[error("POS_BIND_ADDR must be an IP address, got {0:?}")]
    InvalidBindAddr(String),
    #[error("POS_ALLOWED_ORIGIN is not a valid header value: {0:?}")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub allowed_origin: HeaderValue,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bind_addr = match var("POS_BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidBindAddr(raw))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match var("POS_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let origin = var("POS_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin = origin
            .parse::<HeaderValue>()
            .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?;

        Ok(Self {
            bind_addr,
            port,
            static_dir: PathBuf::from(var("POS_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())),
            manifest_path: PathBuf::from(
                var("POS_MANIFEST_PATH").unwrap_or_else(|| DEFAULT_MANIFEST_PATH.to_string()),
            ),
            allowed_origin,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// URL an operator should open. Loopback and wildcard binds are shown as `localhost`.
    pub fn display_url(&self) -> String {
        if self.bind_addr.is_loopback() || self.bind_addr.is_unspecified() {
            format!("http://localhost:{}", self.port)
        } else {
            format!("http://{}", self.socket_addr())
        }
    }
}
