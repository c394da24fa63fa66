// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Connection settings for the Redis backend.

use std::fmt::{self, Debug, Formatter};

use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use serde::Deserialize;
use stowage_backend::Error;

/// The port Redis listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 6379;

const ENV_SERVER: &str = "REDIS_SERVER";
const ENV_PORT: &str = "REDIS_PORT";
const ENV_PASSWORD: &str = "REDIS_PASSWORD";
const ENV_TLS: &str = "REDIS_TLS";

/// Settings used to establish the shared Redis connection.
///
/// Deserializes from `{ "server": ..., "port": ..., "password": ..., "enableTLS": ... }`; every
/// field but `server` is optional. The password is never printed by the `Debug` implementation.
///
/// # Examples
///
/// ```
/// use stowage_redis::RedisConfig;
///
/// let config = RedisConfig::new("cache.internal")
///     .with_port(6380)
///     .with_password("secret")
///     .with_tls(true);
///
/// assert_eq!(config.server(), "cache.internal");
/// assert_eq!(config.port(), 6380);
/// assert!(!format!("{config:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RedisConfig {
    server: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    password: Option<String>,
    #[serde(default, rename = "enableTLS")]
    enable_tls: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Debug for RedisConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("enable_tls", &self.enable_tls)
            .finish()
    }
}

impl RedisConfig {
    /// Creates settings for a server on the default port, without a password or TLS.
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port: DEFAULT_PORT,
            password: None,
            enable_tls: false,
        }
    }

    /// Reads settings from the process environment.
    ///
    /// | Variable | Meaning | Default |
    /// |---|---|---|
    /// | `REDIS_SERVER` | host name | required |
    /// | `REDIS_PORT` | port | `6379` |
    /// | `REDIS_PASSWORD` | password | none |
    /// | `REDIS_TLS` | `true` or `false` | `true` |
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `REDIS_SERVER` is missing or a value cannot be parsed.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the same settings as [`from_env`](Self::from_env) through `lookup`.
    ///
    /// Useful when variables come from somewhere other than the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `REDIS_SERVER` is missing or a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let server = lookup(ENV_SERVER)
            .filter(|server| !server.is_empty())
            .ok_or_else(|| Error::invalid_config(format!("{ENV_SERVER} is not set")))?;

        let port = match lookup(ENV_PORT) {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|error| Error::invalid_config(format!("{ENV_PORT} is not a valid port: {port} ({error})")))?,
            None => DEFAULT_PORT,
        };

        let enable_tls = match lookup(ENV_TLS) {
            Some(tls) => parse_bool(&tls).ok_or_else(|| Error::invalid_config(format!("{ENV_TLS} is not a boolean: {tls}")))?,
            None => true,
        };

        Ok(Self {
            server,
            port,
            password: lookup(ENV_PASSWORD).filter(|password| !password.is_empty()),
            enable_tls,
        })
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the password used to authenticate.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Enables or disables TLS. The server name is used for certificate verification.
    #[must_use]
    pub fn with_tls(mut self, enable: bool) -> Self {
        self.enable_tls = enable;
        self
    }

    /// Returns the configured host name.
    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Returns the configured port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns `true` if a password is configured.
    #[must_use]
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Returns `true` if TLS is enabled.
    #[must_use]
    pub fn tls_enabled(&self) -> bool {
        self.enable_tls
    }

    pub(crate) fn connection_info(&self) -> ConnectionInfo {
        let addr = if self.enable_tls {
            ConnectionAddr::TcpTls {
                host: self.server.clone(),
                port: self.port,
                insecure: false,
                tls_params: None,
            }
        } else {
            ConnectionAddr::Tcp(self.server.clone(), self.port)
        };

        ConnectionInfo {
            addr,
            redis: RedisConnectionInfo {
                password: self.password.clone(),
                ..RedisConnectionInfo::default()
            },
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
