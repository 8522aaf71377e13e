//! Configuration loading and representation.
//!
//! Everything comes from the process environment, optionally seeded from a
//! `.env` file, and is read once at startup.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_API_KEY: &str = "dev-api-key";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Runtime settings for the bottler service.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Postgres connection string. `None` runs against an in-memory store.
    pub postgres_uri: Option<String>,
    pub api_key: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
}

impl core::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("postgres_uri", &self.postgres_uri.as_ref().map(|_| "<redacted>"))
            .field("bind_addr", &self.bind_addr)
            .field("db_max_connections", &self.db_max_connections)
            .finish_non_exhaustive()
    }
}

impl ServiceConfig {
    /// Load from the process environment, after applying `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let postgres_uri = get("POSTGRES_URI");

        let api_key = get("API_KEY").unwrap_or_else(|| {
            tracing::warn!("API_KEY not set; using insecure dev default");
            DEV_API_KEY.to_string()
        });

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: "DB_MAX_CONNECTIONS",
                        message: "must be at least 1".to_string(),
                    });
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "DB_MAX_CONNECTIONS",
                        message: e.to_string(),
                    });
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            postgres_uri,
            api_key,
            bind_addr,
            db_max_connections,
        })
    }
}
