//! A pluggable resource-loading framework.
//!
//! Named loaders, locators, option sets and fallbacks register themselves
//! from any crate at startup. A resource name is then resolved at runtime into
//! a constructed object without the caller knowing its concrete type.
//!
//! ```
//! use keel::prelude::*;
//!
//! let definitions = ResourceDefinitions::new();
//! let manager = ResourceManager::new(definitions);
//!
//! let error = manager.construct("unknown_resource").unwrap_err();
//! assert!(matches!(error, ConstructionError::NoConfiguration { .. }));
//! ```

pub use keel_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use keel_internal::prelude::*;
}
