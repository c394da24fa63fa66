// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test doubles for code that depends on a [`Cache`](crate::Cache).
//!
//! [`MockBackend`] stores values like [`InMemoryBackend`], records every operation it receives
//! and fails operations on demand so error paths can be exercised without a live server.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use parking_lot::Mutex;
use stowage_backend::{Backend, Error};
use stowage_memory::InMemoryBackend;

/// A recorded backend operation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BackendOp {
    /// A scalar was written.
    Set {
        /// The key written.
        key: String,
        /// The stringified value.
        value: String,
    },
    /// A scalar was read.
    Get(String),
    /// A value was appended to a list.
    PushToList {
        /// The list key.
        key: String,
        /// The stringified value.
        value: String,
    },
    /// A list was read.
    GetList(String),
    /// A value was added to a set.
    PushToSet {
        /// The set key.
        key: String,
        /// The stringified value.
        value: String,
    },
    /// A set was read.
    GetSet(String),
    /// Set membership was tested.
    IsSetMember {
        /// The set key.
        key: String,
        /// The value looked up.
        value: String,
    },
    /// Fields were merged into a hash.
    SetHash {
        /// The hash key.
        key: String,
        /// The fields written.
        fields: HashMap<String, String>,
    },
    /// A single hash field was written.
    SetHashField {
        /// The hash key.
        key: String,
        /// The field written.
        field: String,
        /// The stringified value.
        value: String,
    },
    /// A hash field was removed.
    DeleteHashField {
        /// The hash key.
        key: String,
        /// The field removed.
        field: String,
    },
    /// Hash field presence was tested.
    HashFieldExists {
        /// The hash key.
        key: String,
        /// The field looked up.
        field: String,
    },
    /// A hash was read.
    GetHash(String),
}

impl BackendOp {
    /// Returns the operation name used in injected failure messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Set { .. } => "set",
            Self::Get(_) => "get",
            Self::PushToList { .. } => "push_to_list",
            Self::GetList(_) => "get_list",
            Self::PushToSet { .. } => "push_to_set",
            Self::GetSet(_) => "get_set",
            Self::IsSetMember { .. } => "is_set_member",
            Self::SetHash { .. } => "set_hash",
            Self::SetHashField { .. } => "set_hash_field",
            Self::DeleteHashField { .. } => "delete_hash_field",
            Self::HashFieldExists { .. } => "hash_field_exists",
            Self::GetHash(_) => "get_hash",
        }
    }
}

type FailPredicate = Box<dyn Fn(&BackendOp) -> bool + Send + Sync>;

/// A backend that records operations and fails them on demand.
///
/// Clones share storage, recorded operations and the failure predicate. A failed operation is
/// still recorded but does not touch storage.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # futures::executor::block_on(async {
/// use stowage::Cache;
/// use stowage::testing::{BackendOp, MockBackend};
///
/// let mock = MockBackend::new();
/// let cache = Cache::new(mock.clone());
///
/// mock.fail_when(|op| matches!(op, BackendOp::Get(key) if key == "forbidden"));
///
/// assert!(cache.get("forbidden").await.is_err());
/// assert!(cache.get("allowed").await.is_ok());
/// assert_eq!(mock.operations().len(), 2);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct MockBackend {
    store: InMemoryBackend,
    operations: Arc<Mutex<Vec<BackendOp>>>,
    fail_when: Arc<Mutex<Option<FailPredicate>>>,
}

impl Debug for MockBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockBackend")
            .field("store", &self.store)
            .field("operations", &self.operations.lock().len())
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl MockBackend {
    /// Creates an empty mock backend that never fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a predicate that decides which operations fail with [`Error::Connection`].
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&BackendOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a copy of every operation recorded so far.
    #[must_use]
    pub fn operations(&self) -> Vec<BackendOp> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    /// Records `op` and returns an error if it should fail.
    fn admit(&self, op: BackendOp) -> Result<(), Error> {
        let fail = self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(&op));
        let name = op.name();
        self.operations.lock().push(op);

        if fail {
            return Err(Error::connection(format!("mock: {name} failed")));
        }
        Ok(())
    }
}

impl Backend for MockBackend {
    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.admit(BackendOp::Set {
            key: key.to_owned(),
            value: value.clone(),
        })?;
        self.store.set(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.admit(BackendOp::Get(key.to_owned()))?;
        self.store.get(key).await
    }

    async fn push_to_list(&self, key: &str, value: String) -> Result<(), Error> {
        self.admit(BackendOp::PushToList {
            key: key.to_owned(),
            value: value.clone(),
        })?;
        self.store.push_to_list(key, value).await
    }

    async fn get_list(&self, key: &str) -> Result<Vec<String>, Error> {
        self.admit(BackendOp::GetList(key.to_owned()))?;
        self.store.get_list(key).await
    }

    async fn push_to_set(&self, key: &str, value: String) -> Result<(), Error> {
        self.admit(BackendOp::PushToSet {
            key: key.to_owned(),
            value: value.clone(),
        })?;
        self.store.push_to_set(key, value).await
    }

    async fn get_set(&self, key: &str) -> Result<HashSet<String>, Error> {
        self.admit(BackendOp::GetSet(key.to_owned()))?;
        self.store.get_set(key).await
    }

    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool, Error> {
        self.admit(BackendOp::IsSetMember {
            key: key.to_owned(),
            value: value.to_owned(),
        })?;
        self.store.is_set_member(key, value).await
    }

    async fn set_hash(&self, key: &str, fields: HashMap<String, String>) -> Result<(), Error> {
        self.admit(BackendOp::SetHash {
            key: key.to_owned(),
            fields: fields.clone(),
        })?;
        self.store.set_hash(key, fields).await
    }

    async fn set_hash_field(&self, key: &str, field: &str, value: String) -> Result<(), Error> {
        self.admit(BackendOp::SetHashField {
            key: key.to_owned(),
            field: field.to_owned(),
            value: value.clone(),
        })?;
        self.store.set_hash_field(key, field, value).await
    }

    async fn delete_hash_field(&self, key: &str, field: &str) -> Result<(), Error> {
        self.admit(BackendOp::DeleteHashField {
            key: key.to_owned(),
            field: field.to_owned(),
        })?;
        self.store.delete_hash_field(key, field).await
    }

    async fn hash_field_exists(&self, key: &str, field: &str) -> Result<bool, Error> {
        self.admit(BackendOp::HashFieldExists {
            key: key.to_owned(),
            field: field.to_owned(),
        })?;
        self.store.hash_field_exists(key, field).await
    }

    async fn get_hash(&self, key: &str) -> Result<HashMap<String, String>, Error> {
        self.admit(BackendOp::GetHash(key.to_owned()))?;
        self.store.get_hash(key).await
    }
}
