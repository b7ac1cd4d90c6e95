//! # Keel Internal Library
//!
//! Re-exports the core Keel crates for convenience.

/// Layer 1: Keyed creator registries and static registration.
pub use keel_registry;

/// Layer 2: Loaders, locators, options, fallbacks and construction.
pub use keel_resource;

/// Tracing setup and registry reports.
pub use keel_diagnostics;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use keel_diagnostics::{RegistryReport, TracingConfig, TracingFormat};
    pub use keel_registry::Registry;
    pub use keel_resource::prelude::*;
}
