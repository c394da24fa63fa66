// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Core backend abstractions for the stowage cache facade.
//!
//! This crate defines the [`Backend`] trait that every storage engine must satisfy, along with
//! [`Scalar`] for string-or-number values, [`ValueKind`] for describing the shape a key holds,
//! and the shared [`Error`] taxonomy.
//!
//! # Overview
//!
//! A backend stores four shapes of data, each reachable only through its key:
//!
//! - scalars, read back as strings
//! - ordered lists, append-only
//! - unordered sets of unique strings
//! - hashes mapping field names to string values
//!
//! Using a key with an operation of a different shape fails with [`Error::TypeMismatch`].
//!
//! # Implementing a Backend
//!
//! ```
//! use std::collections::{HashMap, HashSet};
//! use std::sync::Mutex;
//!
//! use stowage_backend::{Backend, Error, ValueKind};
//!
//! /// Stores scalars only; every collection operation reports a type mismatch.
//! struct ScalarOnly(Mutex<HashMap<String, String>>);
//!
//! fn unsupported(key: &str, expected: ValueKind) -> Error {
//!     Error::type_mismatch(key, expected)
//! }
//!
//! impl Backend for ScalarOnly {
//!     async fn set(&self, key: &str, value: String) -> Result<(), Error> {
//!         self.0.lock().unwrap().insert(key.to_owned(), value);
//!         Ok(())
//!     }
//!
//!     async fn get(&self, key: &str) -> Result<Option<String>, Error> {
//!         Ok(self.0.lock().unwrap().get(key).cloned())
//!     }
//!
//!     async fn push_to_list(&self, key: &str, _value: String) -> Result<(), Error> {
//!         Err(unsupported(key, ValueKind::List))
//!     }
//!
//!     async fn get_list(&self, key: &str) -> Result<Vec<String>, Error> {
//!         Err(unsupported(key, ValueKind::List))
//!     }
//!
//!     async fn push_to_set(&self, key: &str, _value: String) -> Result<(), Error> {
//!         Err(unsupported(key, ValueKind::Set))
//!     }
//!
//!     async fn get_set(&self, key: &str) -> Result<HashSet<String>, Error> {
//!         Err(unsupported(key, ValueKind::Set))
//!     }
//!
//!     async fn is_set_member(&self, key: &str, _value: &str) -> Result<bool, Error> {
//!         Err(unsupported(key, ValueKind::Set))
//!     }
//!
//!     async fn set_hash(&self, key: &str, _fields: HashMap<String, String>) -> Result<(), Error> {
//!         Err(unsupported(key, ValueKind::Hash))
//!     }
//!
//!     async fn set_hash_field(&self, key: &str, _field: &str, _value: String) -> Result<(), Error> {
//!         Err(unsupported(key, ValueKind::Hash))
//!     }
//!
//!     async fn delete_hash_field(&self, key: &str, _field: &str) -> Result<(), Error> {
//!         Err(unsupported(key, ValueKind::Hash))
//!     }
//!
//!     async fn hash_field_exists(&self, key: &str, _field: &str) -> Result<bool, Error> {
//!         Err(unsupported(key, ValueKind::Hash))
//!     }
//!
//!     async fn get_hash(&self, key: &str) -> Result<HashMap<String, String>, Error> {
//!         Err(unsupported(key, ValueKind::Hash))
//!     }
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! The `dynamic` feature (enabled by default) provides [`DynamicBackend`], a clonable,
//! type-erased wrapper around any `Backend`. It lets callers pick a backend at runtime.

mod backend;
pub mod error;
mod scalar;

#[cfg(any(test, feature = "dynamic"))]
mod dynamic;

#[doc(inline)]
pub use backend::Backend;
#[cfg(any(test, feature = "dynamic"))]
#[doc(inline)]
pub use dynamic::{DynamicBackend, DynamicBackendExt};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use scalar::{Scalar, ValueKind};
