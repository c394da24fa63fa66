// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Redis backend implementation.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Formatter};

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use stowage_backend::{Backend, Error, ValueKind};

use crate::config::RedisConfig;
use crate::error::command_error;

/// A backend that forwards every operation to a Redis server.
///
/// One connection is established by [`connect`](Self::connect) and shared by every operation and
/// every clone of the handle; no operation opens a connection of its own. Each operation is a
/// single Redis command, issued once. Nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use stowage_backend::Backend;
/// use stowage_redis::{RedisBackend, RedisConfig};
///
/// # async fn example() -> Result<(), stowage_backend::Error> {
/// let backend = RedisBackend::connect(&RedisConfig::new("localhost")).await?;
///
/// backend.push_to_set("online", "ada".to_owned()).await?;
/// assert!(backend.is_set_member("online", "ada").await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RedisBackend {
    connection: ConnectionManager,
}

impl Debug for RedisBackend {
    #[cfg_attr(test, mutants::skip)] // Needs a live server to construct.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisBackend").finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Connects to the configured server and verifies the connection with `PING`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the server is unreachable, the TLS handshake fails or
    /// authentication is rejected.
    pub async fn connect(config: &RedisConfig) -> Result<Self, Error> {
        tracing::info!(
            server = config.server(),
            port = config.port(),
            tls = config.tls_enabled(),
            "initializing redis cache"
        );

        let client = Client::open(config.connection_info()).map_err(Error::connection)?;
        // One attempt only; an unreachable server surfaces immediately.
        let manager_config = ConnectionManagerConfig::new().set_number_of_retries(0);
        let mut connection = ConnectionManager::new_with_config(client, manager_config)
            .await
            .map_err(Error::connection)?;

        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(Error::connection)?;

        Ok(Self { connection })
    }

    /// Returns a handle onto the shared connection.
    fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }
}

impl Backend for RedisBackend {
    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.connection()
            .set::<_, _, ()>(key, value)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Scalar))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection()
            .get::<_, Option<String>>(key)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Scalar))
    }

    async fn push_to_list(&self, key: &str, value: String) -> Result<(), Error> {
        self.connection()
            .rpush::<_, _, ()>(key, value)
            .await
            .map_err(|error| command_error(error, key, ValueKind::List))
    }

    async fn get_list(&self, key: &str) -> Result<Vec<String>, Error> {
        self.connection()
            .lrange::<_, Vec<String>>(key, 0, -1)
            .await
            .map_err(|error| command_error(error, key, ValueKind::List))
    }

    async fn push_to_set(&self, key: &str, value: String) -> Result<(), Error> {
        self.connection()
            .sadd::<_, _, ()>(key, value)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Set))
    }

    async fn get_set(&self, key: &str) -> Result<HashSet<String>, Error> {
        self.connection()
            .smembers::<_, HashSet<String>>(key)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Set))
    }

    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool, Error> {
        self.connection()
            .sismember::<_, _, bool>(key, value)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Set))
    }

    async fn set_hash(&self, key: &str, fields: HashMap<String, String>) -> Result<(), Error> {
        // HSET with no field/value pairs is a syntax error on the server.
        if fields.is_empty() {
            return Ok(());
        }

        let items: Vec<(String, String)> = fields.into_iter().collect();
        self.connection()
            .hset_multiple::<_, _, _, ()>(key, &items)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Hash))
    }

    async fn set_hash_field(&self, key: &str, field: &str, value: String) -> Result<(), Error> {
        self.connection()
            .hset::<_, _, _, ()>(key, field, value)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Hash))
    }

    async fn delete_hash_field(&self, key: &str, field: &str) -> Result<(), Error> {
        self.connection()
            .hdel::<_, _, ()>(key, field)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Hash))
    }

    async fn hash_field_exists(&self, key: &str, field: &str) -> Result<bool, Error> {
        self.connection()
            .hexists::<_, _, bool>(key, field)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Hash))
    }

    async fn get_hash(&self, key: &str) -> Result<HashMap<String, String>, Error> {
        self.connection()
            .hgetall::<_, HashMap<String, String>>(key)
            .await
            .map_err(|error| command_error(error, key, ValueKind::Hash))
    }
}
