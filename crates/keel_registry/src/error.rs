//! Error types for registry operations.

use thiserror::Error;

/// Errors raised while registering or creating products.
///
/// Every variant carries the registry's product kind (e.g. `"loader"`) so the
/// message identifies which registry rejected the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A creator with the same key is already registered for this kind.
    #[error("{kind} '{key}' is already registered")]
    DuplicateRegistration {
        /// Product kind of the registry.
        kind: &'static str,
        /// The conflicting key.
        key: String,
    },

    /// No creator is registered under the requested key.
    #[error("unknown {kind} '{key}'")]
    UnknownKey {
        /// Product kind of the registry.
        kind: &'static str,
        /// The requested key.
        key: String,
    },

    /// The registry has been frozen and no longer accepts registrations.
    #[error("{kind} registry is frozen, cannot register '{key}'")]
    Frozen {
        /// Product kind of the registry.
        kind: &'static str,
        /// The key that was being registered.
        key: String,
    },

    /// A creator reported an empty key.
    #[error("{kind} registry keys must be non-empty")]
    EmptyKey {
        /// Product kind of the registry.
        kind: &'static str,
    },
}

impl RegistryError {
    /// Returns the product kind of the registry that raised this error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateRegistration { kind, .. }
            | Self::UnknownKey { kind, .. }
            | Self::Frozen { kind, .. }
            | Self::EmptyKey { kind } => kind,
        }
    }

    /// Returns the key involved, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::DuplicateRegistration { key, .. }
            | Self::UnknownKey { key, .. }
            | Self::Frozen { key, .. } => Some(key),
            Self::EmptyKey { .. } => None,
        }
    }
}
