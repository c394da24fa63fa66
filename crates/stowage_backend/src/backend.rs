// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for cache storage backends.
//!
//! [`Backend`] defines the capability set every storage engine implements. Each operation maps
//! to exactly one primitive of the underlying store.

use std::collections::{HashMap, HashSet};

use crate::Error;

/// Trait for cache backend implementations.
///
/// Every operation is keyed by a cache key and touches only that key. Reads of keys that were
/// never written return `None` or an empty collection. Using a key with an operation of a
/// different shape fails with [`Error::TypeMismatch`] and leaves the stored value untouched.
///
/// Implementations must behave identically for equivalent sequences of operations:
/// - `set_hash` merges the given fields into the existing hash
/// - `set_hash` with no fields does nothing
/// - deleting the last field of a hash removes the key
#[cfg_attr(
    any(test, feature = "dynamic"),
    dynosaur::dynosaur(pub(crate) DynBackend = dyn(box) Backend, bridge(none))
)]
pub trait Backend: Send + Sync {
    /// Stores a scalar, overwriting any previous scalar at `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), Error>> + Send;

    /// Reads the scalar at `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, Error>> + Send;

    /// Appends a value to the end of the list at `key`, creating the list if needed.
    fn push_to_list(&self, key: &str, value: String) -> impl Future<Output = Result<(), Error>> + Send;

    /// Reads the whole list at `key` in insertion order.
    fn get_list(&self, key: &str) -> impl Future<Output = Result<Vec<String>, Error>> + Send;

    /// Adds a value to the set at `key` if it is not already a member.
    fn push_to_set(&self, key: &str, value: String) -> impl Future<Output = Result<(), Error>> + Send;

    /// Reads every member of the set at `key`.
    fn get_set(&self, key: &str) -> impl Future<Output = Result<HashSet<String>, Error>> + Send;

    /// Returns `true` if `value` is a member of the set at `key`.
    fn is_set_member(&self, key: &str, value: &str) -> impl Future<Output = Result<bool, Error>> + Send;

    /// Writes the given fields into the hash at `key`, keeping fields not mentioned.
    fn set_hash(&self, key: &str, fields: HashMap<String, String>) -> impl Future<Output = Result<(), Error>> + Send;

    /// Writes a single field of the hash at `key`.
    fn set_hash_field(&self, key: &str, field: &str, value: String) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes a single field of the hash at `key`. Does nothing if the field is absent.
    fn delete_hash_field(&self, key: &str, field: &str) -> impl Future<Output = Result<(), Error>> + Send;

    /// Returns `true` if the hash at `key` has `field`.
    fn hash_field_exists(&self, key: &str, field: &str) -> impl Future<Output = Result<bool, Error>> + Send;

    /// Reads every field of the hash at `key`.
    fn get_hash(&self, key: &str) -> impl Future<Output = Result<HashMap<String, String>, Error>> + Send;
}
