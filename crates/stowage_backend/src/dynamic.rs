// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Type-erased backend wrapper for choosing a backend at runtime.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use crate::{Backend, Error, backend::DynBackend};

/// Extension trait for converting any `Backend` into a `DynamicBackend`.
///
/// This trait is automatically implemented for all types that implement `Backend`.
///
/// # Examples
///
/// ```
/// use stowage_backend::{Backend, DynamicBackend, DynamicBackendExt};
///
/// fn erase<B: Backend + 'static>(backend: B) -> DynamicBackend {
///     backend.into_dynamic()
/// }
/// ```
pub trait DynamicBackendExt: Sized {
    /// Converts this backend into a `DynamicBackend`.
    fn into_dynamic(self) -> DynamicBackend;
}

impl<B> DynamicBackendExt for B
where
    B: Backend + 'static,
{
    fn into_dynamic(self) -> DynamicBackend {
        DynamicBackend::new(self)
    }
}

/// A clonable backend with type erasure.
///
/// `DynamicBackend` wraps a trait object in an `Arc`, so every clone shares the same underlying
/// backend (and therefore the same connection or map).
pub struct DynamicBackend(Arc<DynBackend<'static>>);

impl DynamicBackend {
    /// Creates a new dynamic backend from any `Backend` implementation.
    pub fn new<B>(backend: B) -> Self
    where
        B: Backend + 'static,
    {
        Self(DynBackend::new_arc(backend))
    }
}

impl Debug for DynamicBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBackend").finish_non_exhaustive()
    }
}

impl Clone for DynamicBackend {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl Backend for DynamicBackend {
    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.0.set(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.0.get(key).await
    }

    async fn push_to_list(&self, key: &str, value: String) -> Result<(), Error> {
        self.0.push_to_list(key, value).await
    }

    async fn get_list(&self, key: &str) -> Result<Vec<String>, Error> {
        self.0.get_list(key).await
    }

    async fn push_to_set(&self, key: &str, value: String) -> Result<(), Error> {
        self.0.push_to_set(key, value).await
    }

    async fn get_set(&self, key: &str) -> Result<HashSet<String>, Error> {
        self.0.get_set(key).await
    }

    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool, Error> {
        self.0.is_set_member(key, value).await
    }

    async fn set_hash(&self, key: &str, fields: HashMap<String, String>) -> Result<(), Error> {
        self.0.set_hash(key, fields).await
    }

    async fn set_hash_field(&self, key: &str, field: &str, value: String) -> Result<(), Error> {
        self.0.set_hash_field(key, field, value).await
    }

    async fn delete_hash_field(&self, key: &str, field: &str) -> Result<(), Error> {
        self.0.delete_hash_field(key, field).await
    }

    async fn hash_field_exists(&self, key: &str, field: &str) -> Result<bool, Error> {
        self.0.hash_field_exists(key, field).await
    }

    async fn get_hash(&self, key: &str) -> Result<HashMap<String, String>, Error> {
        self.0.get_hash(key).await
    }
}
