// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory backend implementation.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use parking_lot::Mutex;
use stowage_backend::{Backend, Error, ValueKind};

use crate::builder::InMemoryBackendBuilder;
use crate::value::Value;

/// A backend that keeps every value in an in-process map.
///
/// The map is guarded by a mutex held only for the duration of each operation, so concurrent
/// pushes to the same list or set never race. Every clone of the handle shares the same map.
///
/// Values are tagged with their shape. Using a key with an operation of a different shape fails
/// with [`Error::TypeMismatch`] and leaves the stored value untouched. Like a remote store's
/// `SET`, [`set`](Backend::set) replaces whatever the key held before.
///
/// # Examples
///
/// ```
/// use stowage_backend::Backend;
/// use stowage_memory::InMemoryBackend;
/// # futures::executor::block_on(async {
///
/// let backend = InMemoryBackend::new();
///
/// backend.set("greeting", "hello".to_owned()).await?;
/// assert_eq!(backend.get("greeting").await?.as_deref(), Some("hello"));
///
/// let error = backend.get_list("greeting").await.unwrap_err();
/// assert!(error.is_type_mismatch());
/// # Ok::<(), stowage_backend::Error>(())
/// # });
/// ```
#[derive(Clone)]
pub struct InMemoryBackend {
    entries: Arc<Mutex<HashMap<String, Value>>>,
    name: Option<Arc<str>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for InMemoryBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

impl InMemoryBackend {
    /// Creates a new empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder for configuring an in-memory backend.
    #[must_use]
    pub fn builder() -> InMemoryBackendBuilder {
        InMemoryBackendBuilder::new()
    }

    pub(crate) fn from_builder(builder: InMemoryBackendBuilder) -> Self {
        tracing::info!(cache.name = builder.name.as_deref(), "initializing in-memory cache");

        let entries = builder.initial_capacity.map_or_else(HashMap::new, HashMap::with_capacity);

        Self {
            entries: Arc::new(Mutex::new(entries)),
            name: builder.name.map(Arc::from),
        }
    }

    /// Returns the name given to this backend, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if no key holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn mismatch(&self, key: &str, expected: ValueKind, found: &Value) -> Error {
        tracing::debug!(
            cache.name = self.name(),
            key,
            expected = expected.as_str(),
            found = found.kind().as_str(),
            "key holds a value of a different shape"
        );
        Error::type_mismatch(key, expected)
    }
}

impl Backend for InMemoryBackend {
    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.entries.lock().insert(key.to_owned(), Value::Scalar(value));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match self.entries.lock().get(key) {
            None => Ok(None),
            Some(Value::Scalar(value)) => Ok(Some(value.clone())),
            Some(other) => Err(self.mismatch(key, ValueKind::Scalar, other)),
        }
    }

    async fn push_to_list(&self, key: &str, value: String) -> Result<(), Error> {
        let mut entries = self.entries.lock();
        match entries.entry(key.to_owned()).or_insert_with(|| Value::List(Vec::new())) {
            Value::List(list) => {
                list.push(value);
                Ok(())
            }
            other => Err(self.mismatch(key, ValueKind::List, other)),
        }
    }

    async fn get_list(&self, key: &str) -> Result<Vec<String>, Error> {
        match self.entries.lock().get(key) {
            None => Ok(Vec::new()),
            Some(Value::List(list)) => Ok(list.clone()),
            Some(other) => Err(self.mismatch(key, ValueKind::List, other)),
        }
    }

    async fn push_to_set(&self, key: &str, value: String) -> Result<(), Error> {
        let mut entries = self.entries.lock();
        match entries.entry(key.to_owned()).or_insert_with(|| Value::Set(HashSet::new())) {
            Value::Set(set) => {
                set.insert(value);
                Ok(())
            }
            other => Err(self.mismatch(key, ValueKind::Set, other)),
        }
    }

    async fn get_set(&self, key: &str) -> Result<HashSet<String>, Error> {
        match self.entries.lock().get(key) {
            None => Ok(HashSet::new()),
            Some(Value::Set(set)) => Ok(set.clone()),
            Some(other) => Err(self.mismatch(key, ValueKind::Set, other)),
        }
    }

    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool, Error> {
        match self.entries.lock().get(key) {
            None => Ok(false),
            Some(Value::Set(set)) => Ok(set.contains(value)),
            Some(other) => Err(self.mismatch(key, ValueKind::Set, other)),
        }
    }

    async fn set_hash(&self, key: &str, fields: HashMap<String, String>) -> Result<(), Error> {
        if fields.is_empty() {
            return Ok(());
        }

        let mut entries = self.entries.lock();
        match entries.entry(key.to_owned()).or_insert_with(|| Value::Hash(HashMap::new())) {
            Value::Hash(hash) => {
                hash.extend(fields);
                Ok(())
            }
            other => Err(self.mismatch(key, ValueKind::Hash, other)),
        }
    }

    async fn set_hash_field(&self, key: &str, field: &str, value: String) -> Result<(), Error> {
        let mut entries = self.entries.lock();
        match entries.entry(key.to_owned()).or_insert_with(|| Value::Hash(HashMap::new())) {
            Value::Hash(hash) => {
                hash.insert(field.to_owned(), value);
                Ok(())
            }
            other => Err(self.mismatch(key, ValueKind::Hash, other)),
        }
    }

    async fn delete_hash_field(&self, key: &str, field: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock();
        let now_empty = match entries.get_mut(key) {
            None => return Ok(()),
            Some(Value::Hash(hash)) => {
                hash.remove(field);
                hash.is_empty()
            }
            Some(other) => return Err(self.mismatch(key, ValueKind::Hash, other)),
        };

        // A hash with no fields does not exist.
        if now_empty {
            entries.remove(key);
        }
        Ok(())
    }

    async fn hash_field_exists(&self, key: &str, field: &str) -> Result<bool, Error> {
        match self.entries.lock().get(key) {
            None => Ok(false),
            Some(Value::Hash(hash)) => Ok(hash.contains_key(field)),
            Some(other) => Err(self.mismatch(key, ValueKind::Hash, other)),
        }
    }

    async fn get_hash(&self, key: &str) -> Result<HashMap<String, String>, Error> {
        match self.entries.lock().get(key) {
            None => Ok(HashMap::new()),
            Some(Value::Hash(hash)) => Ok(hash.clone()),
            Some(other) => Err(self.mismatch(key, ValueKind::Hash, other)),
        }
    }
}
