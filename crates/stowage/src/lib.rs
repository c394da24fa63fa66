// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A uniform cache facade over Redis or an in-process map.
//!
//! [`Cache`] exposes scalar, JSON, list, set and hash operations. Every operation maps onto
//! exactly one primitive of the selected [`Backend`]; there is no eviction, no TTL, no retry and
//! no client-side coordination beyond what the backend itself provides.
//!
//! Two backends are interchangeable behind the same handle:
//!
//! - [`InMemoryBackend`] keeps values in a mutex-guarded map owned by the handle
//! - `RedisBackend` (feature `redis`) forwards every operation to a Redis server over one shared
//!   connection
//!
//! # Examples
//!
//! ```
//! use stowage::Cache;
//! use std::collections::HashSet;
//! # futures::executor::block_on(async {
//!
//! let cache = Cache::memory();
//!
//! cache.set("x", "v1").await?;
//! assert_eq!(cache.get("x").await?.as_deref(), Some("v1"));
//!
//! cache.push_to_set("z", 1).await?;
//! cache.push_to_set("z", 1).await?;
//! cache.push_to_set("z", 2).await?;
//! assert_eq!(cache.get_set("z").await?, HashSet::from(["1".to_owned(), "2".to_owned()]));
//!
//! cache.push_to_list("w", 1).await?;
//! cache.push_to_list("w", 2).await?;
//! assert_eq!(cache.get_list("w").await?, vec!["1", "2"]);
//! # Ok::<(), stowage::Error>(())
//! # });
//! ```
//!
//! ## Choosing a Backend at Runtime
//!
//! ```
//! use stowage::{BackendConfig, Cache};
//! # futures::executor::block_on(async {
//!
//! let config: BackendConfig = serde_json::from_str(r#"{ "backend": "memory" }"#).unwrap();
//! let cache = Cache::init(&config).await?;
//!
//! cache.set_json("y", &serde_json::json!({ "a": 1 })).await?;
//! assert_eq!(cache.get_json::<serde_json::Value>("y").await?, Some(serde_json::json!({ "a": 1 })));
//! # Ok::<(), stowage::Error>(())
//! # });
//! ```

pub mod cache;
pub mod config;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use cache::Cache;
#[doc(inline)]
pub use config::BackendConfig;
#[doc(inline)]
pub use stowage_backend::{Backend, DynamicBackend, DynamicBackendExt, Error, Result, Scalar, ValueKind};
#[doc(inline)]
pub use stowage_memory::{InMemoryBackend, InMemoryBackendBuilder};
#[cfg(feature = "redis")]
#[doc(inline)]
pub use stowage_redis::{RedisBackend, RedisConfig};
