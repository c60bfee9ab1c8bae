//! Service configuration, sourced from the environment at process start.

use std::env;
use std::net::SocketAddr;

use crate::errors::{Error, Result};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3590";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared bearer secret for the `/api/admin` subtree. Required.
    pub admin_secret: String,
    pub listen_addr: SocketAddr,
    /// Origin used to mint `<origin>/m/<id>` merchant URLs.
    pub public_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let admin_secret = env::var("ADMIN_SECRET")
            .map_err(|_| Error::Config("ADMIN_SECRET is not set".to_string()))?;
        if admin_secret.is_empty() {
            return Err(Error::Config("ADMIN_SECRET is empty".to_string()));
        }

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e| Error::Config(format!("invalid LISTEN_ADDR: {e}")))?;

        let public_origin = env::var("PUBLIC_ORIGIN")
            .unwrap_or_else(|_| format!("http://{listen_addr}"))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            admin_secret,
            listen_addr,
            public_origin,
        })
    }
}
