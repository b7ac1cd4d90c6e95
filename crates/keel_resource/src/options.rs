//! Named, mutable option sets consumed while loading.
//!
//! Every construction gets its own [`ResourceOptions`] instance, so a loader
//! may mutate it freely. Options types are pluggable: a loader supplies its
//! preferred type through
//! [`default_options()`](crate::loader::ResourceLoader::default_options), and a
//! record may name any type registered in the options registry instead.

use crate::error::OptionsError;
use crate::settings::Settings;
use core::fmt;
use downcast_rs::{DowncastSync, impl_downcast};
use keel_registry::Creator;

/// Name given to options that were never explicitly named.
pub const DEFAULT_OPTIONS_NAME: &str = "unnamed";

/// Setting reserved for the options name. The pipeline consumes it before
/// [`ResourceOptions::apply`] is called.
pub const NAME_SETTING: &str = "name";

/// A named configuration bag for one load.
///
/// # Example
///
/// ```
/// use keel_resource::error::OptionsError;
/// use keel_resource::options::{DEFAULT_OPTIONS_NAME, ResourceOptions};
/// use keel_resource::settings::Settings;
///
/// #[derive(Debug)]
/// struct SpanOptions {
///     name: String,
///     one_based: bool,
/// }
///
/// impl Default for SpanOptions {
///     fn default() -> Self {
///         Self { name: DEFAULT_OPTIONS_NAME.into(), one_based: true }
///     }
/// }
///
/// impl ResourceOptions for SpanOptions {
///     fn type_name(&self) -> &'static str {
///         "SpanFile"
///     }
///
///     fn name(&self) -> &str {
///         &self.name
///     }
///
///     fn set_name(&mut self, name: String) {
///         self.name = name;
///     }
///
///     fn apply(&mut self, settings: &Settings) -> Result<(), OptionsError> {
///         self.one_based = settings.parse_or("one_based", self.one_based)?;
///         Ok(())
///     }
/// }
///
/// let mut options = SpanOptions::default();
/// options.apply(&Settings::new().with("one_based", "false")).unwrap();
/// assert!(!options.one_based);
/// assert_eq!(options.name(), "unnamed");
/// ```
pub trait ResourceOptions: DowncastSync + fmt::Debug {
    /// Returns the registry key of this options type.
    fn type_name(&self) -> &'static str;

    /// Returns the options name.
    fn name(&self) -> &str;

    /// Renames the options.
    fn set_name(&mut self, name: String);

    /// Populates kind-specific fields from textual settings.
    ///
    /// Fields without a setting keep their documented defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not parse or a setting is not
    /// recognized by this options type.
    fn apply(&mut self, settings: &Settings) -> Result<(), OptionsError>;

    /// Returns the concrete Rust type name for diagnostics.
    fn concrete_type(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl_downcast!(sync ResourceOptions);

// ─────────────────────────────────────────────────────────────────────────────
// BasicResourceOptions
// ─────────────────────────────────────────────────────────────────────────────

/// Options that keep every setting verbatim.
///
/// Used by loaders that have no typed options of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicResourceOptions {
    name: String,
    settings: Settings,
}

impl Default for BasicResourceOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_OPTIONS_NAME.to_string(),
            settings: Settings::new(),
        }
    }
}

impl BasicResourceOptions {
    /// Registry key of this options type.
    pub const KEY: &'static str = "Basic";

    /// Creates unnamed, empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulated settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl ResourceOptions for BasicResourceOptions {
    fn type_name(&self) -> &'static str {
        Self::KEY
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn apply(&mut self, settings: &Settings) -> Result<(), OptionsError> {
        for (key, value) in settings.iter() {
            self.settings.insert(key, value);
        }
        Ok(())
    }
}

/// Creator for [`BasicResourceOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicResourceOptionsCreator;

impl Creator<dyn ResourceOptions> for BasicResourceOptionsCreator {
    fn key(&self) -> &str {
        BasicResourceOptions::KEY
    }

    fn create(&self) -> Box<dyn ResourceOptions> {
        Box::new(BasicResourceOptions::new())
    }
}
