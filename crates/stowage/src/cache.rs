// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The cache facade.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde::de::DeserializeOwned;
use stowage_backend::{Backend, DynamicBackend, DynamicBackendExt, Error, Scalar};
use stowage_memory::InMemoryBackend;

use crate::config::BackendConfig;

/// A handle onto a cache backend.
///
/// Every operation forwards to exactly one primitive of the backend chosen at construction.
/// Values are stored as strings; numbers and booleans are converted through [`Scalar`] on the way
/// in, and JSON values are encoded with `serde_json`.
///
/// Cloning a `Cache` is cheap and every clone shares the same underlying store.
///
/// # Examples
///
/// ```
/// use stowage::Cache;
/// # futures::executor::block_on(async {
///
/// let cache = Cache::memory();
///
/// cache.set_hash("user:1", [("name", "ada"), ("role", "admin")]).await?;
/// cache.set_hash_field("user:1", "role", "owner").await?;
///
/// assert!(cache.hash_field_exists("user:1", "name").await?);
/// assert_eq!(cache.get_hash("user:1").await?["role"], "owner");
/// # Ok::<(), stowage::Error>(())
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Cache {
    backend: DynamicBackend,
}

impl Cache {
    /// Creates a cache over the given backend.
    #[must_use]
    pub fn new<B>(backend: B) -> Self
    where
        B: Backend + 'static,
    {
        Self {
            backend: backend.into_dynamic(),
        }
    }

    /// Creates a cache over a fresh, empty [`InMemoryBackend`].
    #[must_use]
    pub fn memory() -> Self {
        Self::new(InMemoryBackend::new())
    }

    /// Creates a cache over the backend described by `config`.
    ///
    /// For Redis this establishes the shared connection and verifies it before returning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the Redis server cannot be reached or authentication fails.
    pub async fn init(config: &BackendConfig) -> Result<Self, Error> {
        match config {
            BackendConfig::Memory => Ok(Self::memory()),
            #[cfg(feature = "redis")]
            BackendConfig::Redis(redis) => Ok(Self::new(stowage_redis::RedisBackend::connect(redis).await?)),
        }
    }

    /// Stores a scalar at `key`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn set(&self, key: &str, value: impl Into<Scalar>) -> Result<(), Error> {
        self.backend.set(key, value.into().into_string()).await
    }

    /// Reads the scalar at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds a collection, or an error if the backend fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.backend.get(key).await
    }

    /// Stores `value` encoded as JSON at `key`.
    ///
    /// A value that cannot be encoded is logged and not written; the call still succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn set_json<T>(&self, key: &str, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_string(value) {
            Ok(encoded) => self.backend.set(key, encoded).await,
            Err(error) => {
                tracing::warn!(key, %error, "skipping write of a value that cannot be encoded as JSON");
                Ok(())
            }
        }
    }

    /// Reads the JSON value at `key`.
    ///
    /// Returns `None` if the key is absent or its content does not decode as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or `key` holds a collection.
    pub async fn get_json<T>(&self, key: &str) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.backend.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                tracing::debug!(key, %error, "stored value is not valid JSON for the requested type");
                Ok(None)
            }
        }
    }

    /// Appends `value` to the list at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a list, or an error if
    /// the backend fails.
    pub async fn push_to_list(&self, key: &str, value: impl Into<Scalar>) -> Result<(), Error> {
        self.backend.push_to_list(key, value.into().into_string()).await
    }

    /// Reads the list at `key` in insertion order. A missing key reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a list, or an error if
    /// the backend fails.
    pub async fn get_list(&self, key: &str) -> Result<Vec<String>, Error> {
        self.backend.get_list(key).await
    }

    /// Adds `value` to the set at `key`. Adding an existing member does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a set, or an error if
    /// the backend fails.
    pub async fn push_to_set(&self, key: &str, value: impl Into<Scalar>) -> Result<(), Error> {
        self.backend.push_to_set(key, value.into().into_string()).await
    }

    /// Reads the members of the set at `key`. A missing key reads as an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a set, or an error if
    /// the backend fails.
    pub async fn get_set(&self, key: &str) -> Result<HashSet<String>, Error> {
        self.backend.get_set(key).await
    }

    /// Returns `true` if `value` is a member of the set at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a set, or an error if
    /// the backend fails.
    pub async fn is_set_member(&self, key: &str, value: impl Into<Scalar>) -> Result<bool, Error> {
        let value = value.into();
        self.backend.is_set_member(key, value.as_str()).await
    }

    /// Merges `fields` into the hash at `key`. Fields not mentioned keep their values.
    ///
    /// An empty `fields` leaves the cache unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a hash, or an error if
    /// the backend fails.
    pub async fn set_hash<I, F, V>(&self, key: &str, fields: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<Scalar>,
    {
        let fields = fields
            .into_iter()
            .map(|(field, value)| (field.into(), value.into().into_string()))
            .collect::<HashMap<_, _>>();

        self.backend.set_hash(key, fields).await
    }

    /// Writes a single field of the hash at `key`, creating the hash if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a hash, or an error if
    /// the backend fails.
    pub async fn set_hash_field(&self, key: &str, field: &str, value: impl Into<Scalar>) -> Result<(), Error> {
        self.backend.set_hash_field(key, field, value.into().into_string()).await
    }

    /// Removes `field` from the hash at `key`. Removing the last field removes the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a hash, or an error if
    /// the backend fails.
    pub async fn delete_hash_field(&self, key: &str, field: &str) -> Result<(), Error> {
        self.backend.delete_hash_field(key, field).await
    }

    /// Returns `true` if the hash at `key` has `field`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a hash, or an error if
    /// the backend fails.
    pub async fn hash_field_exists(&self, key: &str, field: &str) -> Result<bool, Error> {
        self.backend.hash_field_exists(key, field).await
    }

    /// Reads every field of the hash at `key`. A missing key reads as an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `key` holds something other than a hash, or an error if
    /// the backend fails.
    pub async fn get_hash(&self, key: &str) -> Result<HashMap<String, String>, Error> {
        self.backend.get_hash(key).await
    }
}
