// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Redis-backed backend for the stowage cache facade.
//!
//! [`RedisBackend`] maps every [`Backend`](stowage_backend::Backend) operation onto one native
//! Redis command over a single connection established at startup:
//!
//! | Operation | Command |
//! |---|---|
//! | `set` / `get` | `SET` / `GET` |
//! | `push_to_list` / `get_list` | `RPUSH` / `LRANGE key 0 -1` |
//! | `push_to_set` / `get_set` / `is_set_member` | `SADD` / `SMEMBERS` / `SISMEMBER` |
//! | `set_hash` / `set_hash_field` | `HMSET` / `HSET` |
//! | `delete_hash_field` / `hash_field_exists` / `get_hash` | `HDEL` / `HEXISTS` / `HGETALL` |
//!
//! Connection management, authentication, TLS negotiation and reconnection are delegated to the
//! `redis` client. Client errors are classified into the shared error taxonomy: transport and
//! authentication failures become [`Error::Connection`](stowage_backend::Error::Connection),
//! `WRONGTYPE` replies become [`Error::TypeMismatch`](stowage_backend::Error::TypeMismatch), and
//! everything else is an [`Error::Operation`](stowage_backend::Error::Operation).
//!
//! # Configuration
//!
//! ```
//! use stowage_redis::RedisConfig;
//!
//! let config = RedisConfig::new("localhost").with_port(6379);
//! assert!(!config.tls_enabled());
//! ```
//!
//! [`RedisConfig::from_env`] reads `REDIS_SERVER`, `REDIS_PORT`, `REDIS_PASSWORD` and `REDIS_TLS`.

pub mod backend;
pub mod config;
mod error;

#[doc(inline)]
pub use backend::RedisBackend;
#[doc(inline)]
pub use config::RedisConfig;
