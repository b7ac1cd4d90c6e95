//! Diagnostics for Keel.
//!
//! - [`TracingConfig`] - installs a `tracing-subscriber` with an `EnvFilter`
//!   and a Pretty, Compact or Json formatter
//! - [`RegistryReport`] - lists registered products per kind
//!
//! # Example
//!
//! ```
//! use keel_diagnostics::{RegistryReport, TracingConfig};
//!
//! TracingConfig::new().init();
//! RegistryReport::global().log();
//! ```

pub mod report;
pub mod tracing_setup;

pub use report::{RegistryReport, RegistrySection};
pub use tracing_setup::{ENV_FILTER_VAR, TracingConfig, TracingFormat};
