//! Default configuration for resources that were never configured.
//!
//! A [`FallbackConfiguration`] is registered per resource *kind* in the
//! fallback registry. When a construction request names a resource that has
//! no explicit record, the pipeline creates the fallback registered for the
//! request's kind and asks it for a locator/loader/options triple. Explicit
//! records always win; fallbacks are never consulted for them.
//!
//! # Example
//!
//! ```
//! use keel_registry::Creator;
//! use keel_resource::fallback::{FallbackConfiguration, FallbackDefaults};
//! use keel_resource::options::BasicResourceOptions;
//!
//! struct NativeFallback;
//!
//! impl FallbackConfiguration for NativeFallback {
//!     fn provide_default(&self, resource_name: &str) -> Option<FallbackDefaults> {
//!         Some(FallbackDefaults::new(
//!             "FileSystem",
//!             format!("{resource_name}.pdb"),
//!             "PoseFromPdb",
//!             Box::new(BasicResourceOptions::new()),
//!         ))
//!     }
//! }
//!
//! struct NativeFallbackCreator;
//!
//! impl Creator<dyn FallbackConfiguration> for NativeFallbackCreator {
//!     // Keyed by the resource kind it serves.
//!     fn key(&self) -> &str {
//!         "native"
//!     }
//!
//!     fn create(&self) -> Box<dyn FallbackConfiguration> {
//!         Box::new(NativeFallback)
//!     }
//! }
//!
//! let defaults = NativeFallback.provide_default("native").unwrap();
//! assert_eq!(defaults.locator_identifier, "native.pdb");
//! ```

use crate::options::ResourceOptions;
use crate::settings::Settings;

/// Locator, loader and options to use for an unconfigured resource.
#[derive(Debug)]
pub struct FallbackDefaults {
    /// Locator registry key.
    pub locator_key: String,
    /// Identifier handed to the locator.
    pub locator_identifier: String,
    /// Settings applied to the locator.
    pub locator_settings: Settings,
    /// Loader registry key.
    pub loader_key: String,
    /// Options for the load, used as provided.
    pub options: Box<dyn ResourceOptions>,
}

impl FallbackDefaults {
    /// Creates defaults with no locator settings.
    pub fn new(
        locator_key: impl Into<String>,
        locator_identifier: impl Into<String>,
        loader_key: impl Into<String>,
        options: Box<dyn ResourceOptions>,
    ) -> Self {
        Self {
            locator_key: locator_key.into(),
            locator_identifier: locator_identifier.into(),
            locator_settings: Settings::new(),
            loader_key: loader_key.into(),
            options,
        }
    }

    /// Adds a locator setting.
    #[must_use]
    pub fn with_locator_setting(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.locator_settings.insert(key, value);
        self
    }
}

/// Supplies defaults for one resource kind.
pub trait FallbackConfiguration: Send + Sync {
    /// Returns the defaults for `resource_name`, or `None` if no default is
    /// available (for example because a required input was never supplied).
    fn provide_default(&self, resource_name: &str) -> Option<FallbackDefaults>;

    /// Explains why [`provide_default()`](Self::provide_default) returned
    /// `None`. Included in the resulting error.
    fn explain(&self, resource_name: &str) -> String {
        format!("the fallback for '{resource_name}' has no default available")
    }
}
