//! The construction front door.

use crate::definition::ResourceDefinitions;
use crate::error::ConstructionError;
use crate::pipeline::{Pipeline, Resolution, resolve};
use crate::registries::Registries;
use crate::resource::Resource;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// ResourceRequest
// ─────────────────────────────────────────────────────────────────────────────

/// A request to construct one named resource.
///
/// The kind selects the fallback consulted when the name has no explicit
/// record. It defaults to the name itself, so a fallback registered under
/// `"native"` serves a request for `"native"` without further ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    name: String,
    kind: Option<String>,
}

impl ResourceRequest {
    /// Creates a request whose kind is its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
        }
    }

    /// Sets the kind used for the fallback lookup.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind, defaulting to the name.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(&self.name)
    }
}

impl From<&str> for ResourceRequest {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ResourceRequest {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ResourceManager
// ─────────────────────────────────────────────────────────────────────────────

/// Constructs resources from explicit records and registered fallbacks.
///
/// The manager holds no per-request state: every call to
/// [`construct()`](Self::construct) creates fresh locators, loaders and
/// options, and hands ownership of the result to the caller. It is
/// `Send + Sync` and may be shared across threads.
///
/// The first construction ends the registration phase of its registries.
///
/// # Example
///
/// ```
/// use keel_resource::definition::{ResourceConfiguration, ResourceDefinitions};
/// use keel_resource::error::ConstructionError;
/// use keel_resource::manager::ResourceManager;
/// use keel_resource::pipeline::Stage;
///
/// let definitions = ResourceDefinitions::new()
///     .with(
///         "my_loops",
///         ResourceConfiguration::new("loops", "FileSystem", "/no/such/x.loops", "LoopsFile"),
///     )
///     .unwrap();
/// let manager = ResourceManager::new(definitions);
///
/// let error = manager.construct("my_loops").unwrap_err();
/// assert!(matches!(error, ConstructionError::LocatorFailure { .. }));
/// assert_eq!(error.stage(), Stage::Streamed);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceManager {
    definitions: ResourceDefinitions,
    registries: Arc<Registries>,
}

impl ResourceManager {
    /// Creates a manager backed by the process-wide registries.
    #[must_use]
    pub fn new(definitions: ResourceDefinitions) -> Self {
        Self::with_registries(definitions, Registries::global())
    }

    /// Creates a manager backed by the given registries.
    #[must_use]
    pub fn with_registries(definitions: ResourceDefinitions, registries: Arc<Registries>) -> Self {
        Self {
            definitions,
            registries,
        }
    }

    /// Returns the explicit records.
    #[must_use]
    pub fn definitions(&self) -> &ResourceDefinitions {
        &self.definitions
    }

    /// Returns the registries.
    #[must_use]
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Returns whether `name` has an explicit record.
    #[must_use]
    pub fn has_configuration(&self, name: &str) -> bool {
        self.definitions.contains(name)
    }

    /// Resolves the configuration for a request without constructing it.
    pub fn resolve(&self, request: &ResourceRequest) -> Resolution<'_> {
        resolve(
            &self.registries,
            &self.definitions,
            request.name(),
            request.kind(),
        )
    }

    /// Constructs a resource.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] naming the resource, the key involved
    /// and the stage that could not be reached.
    pub fn construct(
        &self,
        request: impl Into<ResourceRequest>,
    ) -> Result<Box<dyn Resource>, ConstructionError> {
        let request = request.into();
        self.registries.finish();

        tracing::debug!(resource = request.name(), kind = request.kind(), "constructing resource");

        let result = Pipeline::new(&self.registries, request.name())
            .locate(self.resolve(&request))
            .and_then(|located| located.stream())
            .and_then(|streamed| streamed.load());

        if let Err(error) = &result {
            tracing::debug!(
                resource = request.name(),
                stage = %error.stage(),
                %error,
                "construction failed"
            );
        }
        result
    }

    /// Constructs a resource and downcasts it to `T`.
    ///
    /// # Errors
    ///
    /// Same as [`construct()`](Self::construct), plus
    /// [`ConstructionError::TypeMismatch`] if the loader produced another type.
    pub fn construct_as<T: Resource>(
        &self,
        request: impl Into<ResourceRequest>,
    ) -> Result<Box<T>, ConstructionError> {
        let request = request.into();
        let name = request.name().to_string();
        let resource = self.construct(request)?;
        let actual = resource.type_name();

        resource
            .downcast::<T>()
            .map_err(|_| ConstructionError::TypeMismatch {
                resource: name,
                expected: core::any::type_name::<T>(),
                actual,
            })
    }
}
