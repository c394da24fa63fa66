// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-process map backend for the stowage cache facade.
//!
//! This crate provides [`InMemoryBackend`], a [`Backend`](stowage_backend::Backend) that keeps
//! every value in a mutex-guarded map owned by the backend handle. There is no persistence, no
//! network cost and no eviction. Clones of the handle share the same map.
//!
//! # Quick Start
//!
//! ```
//! use stowage_backend::Backend;
//! use stowage_memory::InMemoryBackend;
//!
//! # futures::executor::block_on(async {
//! let backend = InMemoryBackend::new();
//!
//! backend.push_to_list("jobs", "first".to_owned()).await?;
//! backend.push_to_list("jobs", "second".to_owned()).await?;
//! assert_eq!(backend.get_list("jobs").await?, vec!["first", "second"]);
//! # Ok::<(), stowage_backend::Error>(())
//! # });
//! ```
//!
//! # Type Safety
//!
//! Each key holds exactly one shape of value. Using a key with an operation of a different shape
//! fails with [`Error::TypeMismatch`](stowage_backend::Error::TypeMismatch) and leaves the stored
//! value untouched.

pub mod backend;
pub mod builder;
mod value;

#[doc(inline)]
pub use backend::InMemoryBackend;
#[doc(inline)]
pub use builder::InMemoryBackendBuilder;
