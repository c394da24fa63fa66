// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for backend operations.

use std::borrow::Cow;

use crate::ValueKind;

/// A boxed error from an underlying client library.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A specialized [`Result`] type for backend operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error from a backend operation.
///
/// No operation is ever retried; every failure is surfaced to the immediate caller. Failures to
/// decode stored JSON are not errors at all, they read as absent values.
///
/// Future versions may add additional enum variants.
///
/// # Examples
///
/// ```
/// use stowage_backend::{Error, ValueKind};
///
/// let error = Error::type_mismatch("users", ValueKind::Hash);
/// assert!(error.is_type_mismatch());
/// assert_eq!(error.to_string(), "key `users` does not hold a hash");
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The backend could not be reached, the connection dropped, or authentication failed.
    #[error("connection to the cache backend failed: {0}")]
    Connection(#[source] BoxError),

    /// The backend rejected the request.
    #[error("the cache backend rejected the operation: {0}")]
    Operation(#[source] BoxError),

    /// The key holds a value of a different shape than the operation expects.
    #[error("key `{key}` does not hold a {expected}")]
    TypeMismatch {
        /// The key that was accessed.
        key: String,
        /// The shape the operation expected to find.
        expected: ValueKind,
    },

    /// Configuration could not be loaded or is malformed.
    #[error("invalid cache configuration: {0}")]
    InvalidConfig(Cow<'static, str>),
}

impl Error {
    /// Creates a connection error from any underlying cause.
    pub fn connection(cause: impl Into<BoxError>) -> Self {
        Self::Connection(cause.into())
    }

    /// Creates an operation error from any underlying cause.
    pub fn operation(cause: impl Into<BoxError>) -> Self {
        Self::Operation(cause.into())
    }

    /// Creates a type mismatch error for `key`.
    pub fn type_mismatch(key: impl Into<String>, expected: ValueKind) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
        }
    }

    /// Creates a configuration error with the given message.
    pub fn invalid_config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns `true` if the backend could not be reached.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if a key was used with an operation of the wrong shape.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}
