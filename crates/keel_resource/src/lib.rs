//! Resource loading for Keel (Layer 2).
//!
//! This crate turns a resource *name* into a constructed in-memory object
//! without the caller knowing the concrete type ahead of time. Products are
//! pluggable and contributed from any crate through static registration.
//!
//! # Quick Start
//!
//! ```ignore
//! use keel_resource::prelude::*;
//!
//! // In the crate that owns the loader:
//! keel_resource::submit!(LoaderRegistration, LoopsFileLoaderCreator);
//!
//! // At runtime:
//! let definitions = ResourceDefinitions::from_path("resources.json")?;
//! let manager = ResourceManager::new(definitions);
//! let loops = manager.construct_as::<Loops>("my_loops")?;
//! ```
//!
//! # Architecture
//!
//! - [`ResourceLocator`] - resolves an identifier into a [`ResourceStream`]
//! - [`ResourceLoader`] - turns a stream plus [`ResourceOptions`] into a [`Resource`]
//! - [`FallbackConfiguration`] - supplies defaults for unconfigured resources, per kind
//! - [`Registries`] - one [`Registry`](keel_registry::Registry) per product kind
//! - [`ResourceDefinitions`] - explicit per-resource records
//! - [`Pipeline`] - the `Unresolved -> Located -> Streamed -> Loaded` stages
//! - [`ResourceManager`] - resolves and constructs by name
//!
//! Built-in products: the `FileSystem`, `NullLocator` and `Inline` locators
//! and `Basic` options, all installed into [`Registries::global()`].

pub mod definition;
pub mod error;
pub mod fallback;
pub mod loader;
pub mod locator;
pub mod locators;
pub mod manager;
pub mod options;
pub mod pipeline;
pub mod registries;
pub mod resource;
pub mod settings;
pub mod stream;

pub use definition::{ResourceConfiguration, ResourceDefinitions};
pub use error::{ConstructionError, DefinitionError, LoaderError, LocatorError, OptionsError};
pub use fallback::{FallbackConfiguration, FallbackDefaults};
pub use loader::{ResourceLoader, expect_options};
pub use locator::ResourceLocator;
pub use manager::{ResourceManager, ResourceRequest};
pub use options::{BasicResourceOptions, ResourceOptions};
pub use pipeline::{Pipeline, Resolution, Stage};
pub use registries::{
    FallbackRegistration, LoaderRegistration, LocatorRegistration, OptionsRegistration, Registries,
};
pub use resource::Resource;
pub use settings::Settings;
pub use stream::ResourceStream;

// Static registration macros, usable as `keel_resource::submit!`.
pub use keel_registry::{Creator, FnCreator, RegistryError, submit};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::definition::*;
    pub use crate::error::*;
    pub use crate::fallback::*;
    pub use crate::loader::*;
    pub use crate::locator::*;
    pub use crate::locators::*;
    pub use crate::manager::*;
    pub use crate::options::*;
    pub use crate::pipeline::{Pipeline, Resolution, Stage};
    pub use crate::registries::*;
    pub use crate::resource::*;
    pub use crate::settings::*;
    pub use crate::stream::*;
    pub use keel_registry::{Creator, FnCreator, RegistryError, submit};
}
