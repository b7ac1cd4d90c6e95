//! The four product registries and their static registration types.
//!
//! Crates contribute products by submitting creators under one of the
//! registration types declared here:
//!
//! ```ignore
//! keel_resource::submit!(LoaderRegistration, LoopsFileLoaderCreator);
//! keel_resource::submit!(FallbackRegistration, LoopsFallbackCreator);
//! ```
//!
//! [`Registries::global()`] installs every submission the first time it is
//! touched. Two submissions under the same key abort startup.

use crate::fallback::FallbackConfiguration;
use crate::loader::ResourceLoader;
use crate::locator::ResourceLocator;
use crate::locators::{FileSystemLocatorCreator, InlineLocatorCreator, NullLocatorCreator};
use crate::options::{BasicResourceOptionsCreator, ResourceOptions};
use keel_registry::{Registry, registrar, submit};
use std::sync::{Arc, LazyLock};

// ─────────────────────────────────────────────────────────────────────────────
// Registration Types
// ─────────────────────────────────────────────────────────────────────────────

registrar! {
    /// Static registration of a [`ResourceLoader`] creator.
    pub struct LoaderRegistration => dyn ResourceLoader;
}

registrar! {
    /// Static registration of a [`ResourceLocator`] creator.
    pub struct LocatorRegistration => dyn ResourceLocator;
}

registrar! {
    /// Static registration of a [`ResourceOptions`] creator.
    pub struct OptionsRegistration => dyn ResourceOptions;
}

registrar! {
    /// Static registration of a [`FallbackConfiguration`] creator, keyed by
    /// resource kind.
    pub struct FallbackRegistration => dyn FallbackConfiguration;
}

submit!(LocatorRegistration, FileSystemLocatorCreator);
submit!(LocatorRegistration, NullLocatorCreator);
submit!(LocatorRegistration, InlineLocatorCreator);
submit!(OptionsRegistration, BasicResourceOptionsCreator);

// ─────────────────────────────────────────────────────────────────────────────
// Registries
// ─────────────────────────────────────────────────────────────────────────────

static GLOBAL: LazyLock<Arc<Registries>> =
    LazyLock::new(|| Arc::new(Registries::with_static_registrations()));

/// One registry per product kind.
///
/// Most programs use the process-wide [`global()`](Self::global) instance.
/// Tests and embedders that need isolation build their own with
/// [`new()`](Self::new) and register products at runtime.
#[derive(Debug)]
pub struct Registries {
    loaders: Registry<dyn ResourceLoader>,
    locators: Registry<dyn ResourceLocator>,
    options: Registry<dyn ResourceOptions>,
    fallbacks: Registry<dyn FallbackConfiguration>,
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}

impl Registries {
    /// Creates empty registries with no built-in products.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaders: Registry::new("loader"),
            locators: Registry::new("locator"),
            options: Registry::new("options"),
            fallbacks: Registry::new("fallback"),
        }
    }

    /// Creates registries holding every statically submitted creator,
    /// including the built-in locators and options.
    ///
    /// # Panics
    ///
    /// Panics if two submissions share a key within one product kind.
    #[must_use]
    pub fn with_static_registrations() -> Self {
        let registries = Self::new();
        registries.install_static_registrations();
        registries
    }

    fn install_static_registrations(&self) {
        self.loaders.install::<LoaderRegistration>();
        self.locators.install::<LocatorRegistration>();
        self.options.install::<OptionsRegistration>();
        self.fallbacks.install::<FallbackRegistration>();
    }

    /// Returns the process-wide registries.
    ///
    /// The first call installs every static submission.
    ///
    /// # Panics
    ///
    /// The first call panics if two submissions share a key within one
    /// product kind.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the loader registry.
    #[must_use]
    pub fn loaders(&self) -> &Registry<dyn ResourceLoader> {
        &self.loaders
    }

    /// Returns the locator registry.
    #[must_use]
    pub fn locators(&self) -> &Registry<dyn ResourceLocator> {
        &self.locators
    }

    /// Returns the options registry.
    #[must_use]
    pub fn options(&self) -> &Registry<dyn ResourceOptions> {
        &self.options
    }

    /// Returns the fallback registry, keyed by resource kind.
    #[must_use]
    pub fn fallbacks(&self) -> &Registry<dyn FallbackConfiguration> {
        &self.fallbacks
    }

    /// Ends the registration phase by freezing every registry.
    ///
    /// Hosts call this once startup is over, before serving requests.
    /// Construction calls it implicitly. Idempotent.
    pub fn finish(&self) {
        self.loaders.freeze();
        self.locators.freeze();
        self.options.freeze();
        self.fallbacks.freeze();
    }

    /// Returns whether every registry is frozen.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.loaders.is_frozen()
            && self.locators.is_frozen()
            && self.options.is_frozen()
            && self.fallbacks.is_frozen()
    }

    /// Restores the registries to their startup state: runtime registrations
    /// are dropped, static submissions are reinstalled, nothing is frozen.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn reset(&self) {
        self.loaders.reset();
        self.locators.reset();
        self.options.reset();
        self.fallbacks.reset();
        self.install_static_registrations();
    }
}
