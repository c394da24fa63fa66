// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring in-memory backends.

use crate::backend::InMemoryBackend;

/// Builder for configuring an `InMemoryBackend`.
///
/// # Examples
///
/// ```
/// use stowage_memory::InMemoryBackend;
///
/// let backend = InMemoryBackend::builder()
///     .initial_capacity(128)
///     .name("sessions")
///     .build();
///
/// assert_eq!(backend.name(), Some("sessions"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackendBuilder {
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) name: Option<String>,
}

impl InMemoryBackendBuilder {
    /// Creates a new builder with default settings.
    ///
    /// The default configuration creates an empty, unnamed backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of keys to pre-allocate room for.
    ///
    /// The map still grows beyond this size; there is no upper bound.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets a name for the backend.
    ///
    /// The name appears in log events emitted by the backend.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the configured `InMemoryBackend`.
    #[must_use]
    pub fn build(self) -> InMemoryBackend {
        InMemoryBackend::from_builder(self)
    }
}
