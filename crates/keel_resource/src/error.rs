//! Error types for resource location, loading and construction.

use crate::pipeline::Stage;
use keel_registry::RegistryError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// LocatorError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised by a [`ResourceLocator`](crate::locator::ResourceLocator).
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Nothing exists at the resolved location.
    #[error("'{identifier}' not found at {}", path.display())]
    NotFound {
        /// Identifier passed to the locator.
        identifier: String,
        /// Resolved path.
        path: PathBuf,
    },

    /// The resolved location escapes the locator's base directory.
    #[error("'{identifier}' resolves outside of {}", base.display())]
    OutsideBase {
        /// Identifier passed to the locator.
        identifier: String,
        /// The configured base directory.
        base: PathBuf,
    },

    /// The source exists but could not be read.
    #[error("failed to open '{identifier}': {source}")]
    Io {
        /// Identifier passed to the locator.
        identifier: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A locator setting was missing, unknown or malformed.
    #[error("invalid locator setting '{key}': {reason}")]
    InvalidSetting {
        /// The offending setting.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl LocatorError {
    /// Creates an [`InvalidSetting`](Self::InvalidSetting).
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LoaderError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised by a [`ResourceLoader`](crate::loader::ResourceLoader).
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The stream content could not be parsed.
    #[error("malformed content at line {line}: {message}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// The content parsed but failed semantic validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The loader received options of a type it does not understand.
    #[error("expected {expected} options, got {actual}")]
    UnexpectedOptions {
        /// Rust type the loader expects.
        expected: &'static str,
        /// Rust type it received.
        actual: &'static str,
    },

    /// Reading the stream failed.
    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

impl LoaderError {
    /// Creates a [`Malformed`](Self::Malformed).
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }

    /// Creates a [`Validation`](Self::Validation).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OptionsError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while applying settings to [`ResourceOptions`](crate::options::ResourceOptions).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// A setting value could not be parsed.
    #[error("invalid value '{value}' for option '{key}': {reason}")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The options type does not recognize the setting.
    #[error("unknown option '{key}' for {options_type} options")]
    UnknownSetting {
        /// Setting name.
        key: String,
        /// Options type that rejected it.
        options_type: &'static str,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// DefinitionError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while building [`ResourceDefinitions`](crate::definition::ResourceDefinitions).
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Two records share a resource name.
    #[error("resource '{0}' is already defined")]
    DuplicateResource(String),

    /// A required field is empty.
    #[error("resource '{resource}' is missing '{field}'")]
    MissingField {
        /// Resource name.
        resource: String,
        /// Empty field.
        field: &'static str,
    },

    /// The JSON input is malformed.
    #[error("invalid resource definitions: {0}")]
    Json(#[from] serde_json::Error),

    /// The definitions file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// ConstructionError
// ─────────────────────────────────────────────────────────────────────────────

/// A failed run of the construction pipeline.
///
/// Every variant names the resource and the key involved, and
/// [`stage()`](Self::stage) reports which stage could not be reached.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// Neither an explicit record nor a usable fallback exists.
    #[error("no configuration for resource '{resource}' (kind '{kind}'): {reason}")]
    NoConfiguration {
        /// Requested resource name.
        resource: String,
        /// Kind used for the fallback lookup.
        kind: String,
        /// Why no fallback applied.
        reason: String,
    },

    /// A configured locator, loader or options key is not registered.
    #[error("resource '{resource}' failed before reaching {stage}: {source}")]
    UnknownKey {
        /// Requested resource name.
        resource: String,
        /// Stage that could not be reached.
        stage: Stage,
        /// Registry lookup failure.
        #[source]
        source: RegistryError,
    },

    /// The locator could not produce a stream.
    #[error("resource '{resource}': locator '{locator_key}' failed for '{identifier}': {source}")]
    LocatorFailure {
        /// Requested resource name.
        resource: String,
        /// Locator registry key.
        locator_key: String,
        /// Identifier passed to the locator.
        identifier: String,
        /// Locator failure.
        #[source]
        source: LocatorError,
    },

    /// Settings could not be applied to the options.
    #[error("resource '{resource}': invalid options for loader '{loader_key}': {source}")]
    InvalidOptions {
        /// Requested resource name.
        resource: String,
        /// Loader registry key.
        loader_key: String,
        /// Options failure.
        #[source]
        source: OptionsError,
    },

    /// The loader rejected the stream.
    #[error("resource '{resource}': loader '{loader_key}' failed: {source}")]
    LoaderFailure {
        /// Requested resource name.
        resource: String,
        /// Loader registry key.
        loader_key: String,
        /// Loader failure.
        #[source]
        source: LoaderError,
    },

    /// The loaded resource is not of the type the caller asked for.
    #[error("resource '{resource}' is a {actual}, not a {expected}")]
    TypeMismatch {
        /// Requested resource name.
        resource: String,
        /// Requested type.
        expected: &'static str,
        /// Type the loader produced.
        actual: &'static str,
    },
}

impl ConstructionError {
    /// Returns the requested resource name.
    #[must_use]
    pub fn resource(&self) -> &str {
        match self {
            Self::NoConfiguration { resource, .. }
            | Self::UnknownKey { resource, .. }
            | Self::LocatorFailure { resource, .. }
            | Self::InvalidOptions { resource, .. }
            | Self::LoaderFailure { resource, .. }
            | Self::TypeMismatch { resource, .. } => resource,
        }
    }

    /// Returns the stage the pipeline failed to reach.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::NoConfiguration { .. } => Stage::Located,
            Self::UnknownKey { stage, .. } => *stage,
            Self::LocatorFailure { .. } => Stage::Streamed,
            Self::InvalidOptions { .. }
            | Self::LoaderFailure { .. }
            | Self::TypeMismatch { .. } => Stage::Loaded,
        }
    }

    /// Returns the kind or registry key involved in the failure.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::NoConfiguration { kind, .. } => Some(kind),
            Self::UnknownKey { source, .. } => source.key(),
            Self::LocatorFailure { locator_key, .. } => Some(locator_key),
            Self::InvalidOptions { loader_key, .. } | Self::LoaderFailure { loader_key, .. } => {
                Some(loader_key)
            }
            Self::TypeMismatch { .. } => None,
        }
    }
}
