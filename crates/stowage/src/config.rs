// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Backend selection.

use serde::Deserialize;
use stowage_backend::Error;
#[cfg(feature = "redis")]
use stowage_redis::RedisConfig;

const ENV_BACKEND: &str = "CACHE_BACKEND";

/// Selects the backend a [`Cache`](crate::Cache) is initialized over.
///
/// Deserializes from an object tagged by `backend`:
///
/// ```json
/// { "backend": "memory" }
/// { "backend": "redis", "server": "cache.internal", "port": 6380, "enableTLS": true }
/// ```
///
/// Future versions may add additional backends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
#[non_exhaustive]
pub enum BackendConfig {
    /// An in-process map, empty on start.
    #[default]
    Memory,

    /// A Redis server reached over one shared connection.
    #[cfg(feature = "redis")]
    #[cfg_attr(docsrs, doc(cfg(feature = "redis")))]
    Redis(RedisConfig),
}

impl BackendConfig {
    /// Reads the backend selection from the process environment.
    ///
    /// `CACHE_BACKEND` is `memory` (the default when unset) or `redis`. When it is `redis`, the
    /// connection settings are read as described by `RedisConfig::from_env`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `CACHE_BACKEND` names an unknown backend, names a
    /// backend this build does not include, or the Redis settings are incomplete.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the same settings as [`from_env`](Self::from_env) through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] under the same conditions as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let Some(backend) = lookup(ENV_BACKEND) else {
            return Ok(Self::Memory);
        };

        match backend.trim().to_ascii_lowercase().as_str() {
            "" | "memory" => Ok(Self::Memory),
            #[cfg(feature = "redis")]
            "redis" => RedisConfig::from_lookup(lookup).map(Self::Redis),
            #[cfg(not(feature = "redis"))]
            "redis" => Err(Error::invalid_config(format!(
                "{ENV_BACKEND} is `redis` but the `redis` feature is not enabled"
            ))),
            _ => Err(Error::invalid_config(format!("{ENV_BACKEND} names an unknown backend: {backend}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    #[case::unset(&[])]
    #[case::empty(&[("CACHE_BACKEND", "")])]
    #[case::lowercase(&[("CACHE_BACKEND", "memory")])]
    #[case::mixed_case(&[("CACHE_BACKEND", " Memory ")])]
    fn selects_memory(#[case] vars: &[(&str, &str)]) {
        assert_eq!(BackendConfig::from_lookup(lookup(vars)).unwrap(), BackendConfig::Memory);
    }

    #[test]
    fn rejects_unknown_backend() {
        let error = BackendConfig::from_lookup(lookup(&[("CACHE_BACKEND", "memcached")])).unwrap_err();

        assert!(matches!(error, Error::InvalidConfig(_)));
        assert!(error.to_string().contains("memcached"));
    }

    #[cfg(not(feature = "redis"))]
    #[test]
    fn redis_requires_feature() {
        let error = BackendConfig::from_lookup(lookup(&[("CACHE_BACKEND", "redis")])).unwrap_err();

        assert!(error.to_string().contains("feature"));
    }

    #[cfg(feature = "redis")]
    #[test]
    fn redis_reads_connection_settings() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("CACHE_BACKEND", "redis"),
            ("REDIS_SERVER", "cache.internal"),
            ("REDIS_PORT", "6380"),
        ]))
        .unwrap();

        let BackendConfig::Redis(redis) = config else {
            panic!("expected a redis config");
        };
        assert_eq!(redis.server(), "cache.internal");
        assert_eq!(redis.port(), 6380);
    }

    #[cfg(feature = "redis")]
    #[test]
    fn redis_without_server_is_rejected() {
        let error = BackendConfig::from_lookup(lookup(&[("CACHE_BACKEND", "redis")])).unwrap_err();

        assert!(error.to_string().contains("REDIS_SERVER"));
    }

    #[test]
    fn deserializes_memory() {
        let config: BackendConfig = serde_json::from_str(r#"{ "backend": "memory" }"#).unwrap();

        assert_eq!(config, BackendConfig::default());
    }

    #[cfg(feature = "redis")]
    #[test]
    fn deserializes_redis() {
        let config: BackendConfig =
            serde_json::from_str(r#"{ "backend": "redis", "server": "cache.internal", "enableTLS": true }"#).unwrap();

        assert_eq!(config, BackendConfig::Redis(RedisConfig::new("cache.internal").with_tls(true)));
    }
}
