//! Keyed creator registries for Keel (Layer 1).
//!
//! `keel_registry` provides the generic machinery every pluggable product kind
//! is built on:
//!
//! - [`Creator`] - A stateless factory for one concrete product type
//! - [`Registry`] - A key-to-creator map for one product kind
//! - [`Registrar`] - Static self-registration collected with [`inventory`]
//! - [`RegistryError`] - Registration and lookup failures
//!
//! # Lifecycle
//!
//! A registry accepts registrations until it is frozen, either explicitly with
//! [`Registry::freeze`] or implicitly by the first [`Registry::create`] call.
//! After that it is read-only and may be shared freely across threads.
//!
//! # Example
//!
//! ```
//! use keel_registry::{Creator, Registry};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! struct EnglishCreator;
//! impl Creator<dyn Greeter> for EnglishCreator {
//!     fn key(&self) -> &str {
//!         "English"
//!     }
//!
//!     fn create(&self) -> Box<dyn Greeter> {
//!         Box::new(English)
//!     }
//! }
//!
//! let registry: Registry<dyn Greeter> = Registry::new("greeter");
//! registry.register(EnglishCreator).unwrap();
//!
//! let greeter = registry.create("English").unwrap();
//! assert_eq!(greeter.greet(), "hello");
//! assert!(registry.is_frozen());
//! ```

/// Creator trait and function-pointer creators.
pub mod creator;

/// Registry error types.
pub mod error;

/// Static self-registration support.
pub mod registrar;

/// Keyed creator registry.
pub mod registry;

pub use creator::{Creator, FnCreator};
pub use error::RegistryError;
pub use registrar::Registrar;
pub use registry::Registry;

/// Re-exported so [`registrar!`] and [`submit!`] expand without a direct
/// dependency in downstream crates.
pub use inventory;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::creator::*;
    pub use crate::error::*;
    pub use crate::registrar::*;
    pub use crate::registry::*;
}
