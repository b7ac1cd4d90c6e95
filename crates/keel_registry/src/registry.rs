//! Keyed creator registry.
//!
//! A [`Registry`] maps string keys to [`Creator`]s for one product kind.
//! Registries follow a two-phase lifecycle:
//!
//! 1. **Build Phase** - creators are registered, either statically through
//!    [`install()`](Registry::install) or at runtime through
//!    [`register()`](Registry::register).
//! 2. **Frozen Phase** - after [`freeze()`](Registry::freeze) or the first
//!    [`create()`](Registry::create), registration is rejected and the registry
//!    is read-only.
//!
//! Duplicate keys are always rejected. A silent overwrite would pick between
//! two independently contributed implementations depending on link order.
//!
//! # Usage
//!
//! ```
//! use keel_registry::{FnCreator, Registry, RegistryError};
//!
//! fn build() -> Box<str> {
//!     "value".into()
//! }
//!
//! let registry: Registry<str> = Registry::new("text");
//! registry.register(FnCreator::new("Value", build)).unwrap();
//!
//! // A second creator under the same key is rejected.
//! let duplicate = registry.register(FnCreator::new("Value", build));
//! assert!(matches!(
//!     duplicate,
//!     Err(RegistryError::DuplicateRegistration { .. })
//! ));
//!
//! registry.freeze();
//! assert!(matches!(
//!     registry.register(FnCreator::new("Other", build)),
//!     Err(RegistryError::Frozen { .. })
//! ));
//! assert_eq!(&*registry.create("Value").unwrap(), "value");
//! ```

use crate::creator::Creator;
use crate::error::RegistryError;
use crate::registrar::Registrar;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// CreatorRef
// ─────────────────────────────────────────────────────────────────────────────

/// How a registry holds on to a creator.
///
/// Statically submitted creators live for the whole process and are borrowed.
/// Runtime creators are shared with the caller that registered them.
enum CreatorRef<P: ?Sized + 'static> {
    Static(&'static dyn Creator<P>),
    Shared(Arc<dyn Creator<P>>),
}

impl<P: ?Sized + 'static> CreatorRef<P> {
    fn get(&self) -> &dyn Creator<P> {
        match self {
            Self::Static(creator) => *creator,
            Self::Shared(creator) => creator.as_ref(),
        }
    }
}

impl<P: ?Sized + 'static> Clone for CreatorRef<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(creator) => Self::Static(*creator),
            Self::Shared(creator) => Self::Shared(Arc::clone(creator)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of creators for one product kind.
///
/// `P` is the product type handed out by [`create()`](Self::create), usually a
/// trait object. The registry is `Send + Sync` regardless of `P`, so it can sit
/// in a process-wide static.
pub struct Registry<P: ?Sized + 'static> {
    /// Product kind used in diagnostics (e.g. `"loader"`).
    kind: &'static str,
    /// Creators in insertion order.
    creators: RwLock<IndexMap<String, CreatorRef<P>>>,
    /// Set once; never cleared outside of test builds.
    frozen: AtomicBool,
}

impl<P: ?Sized + 'static> fmt::Debug for Registry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("keys", &self.all_keys())
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

impl<P: ?Sized + 'static> Registry<P> {
    /// Creates an empty, unfrozen registry for the given product kind.
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            creators: RwLock::new(IndexMap::new()),
            frozen: AtomicBool::new(false),
        }
    }

    /// Returns the product kind this registry serves.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Registers a creator under its own key.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::EmptyKey`] if the creator reports an empty key
    /// - [`RegistryError::Frozen`] if the registry has been frozen
    /// - [`RegistryError::DuplicateRegistration`] if the key is taken; the
    ///   existing registration is left untouched
    pub fn register<C: Creator<P>>(&self, creator: C) -> Result<(), RegistryError> {
        self.insert(CreatorRef::Shared(Arc::new(creator)))
    }

    /// Registers a creator that is already shared.
    ///
    /// # Errors
    ///
    /// Same as [`register()`](Self::register).
    pub fn register_shared(&self, creator: Arc<dyn Creator<P>>) -> Result<(), RegistryError> {
        self.insert(CreatorRef::Shared(creator))
    }

    /// Registers a creator with static lifetime without taking ownership.
    ///
    /// # Errors
    ///
    /// Same as [`register()`](Self::register).
    pub fn register_static(&self, creator: &'static dyn Creator<P>) -> Result<(), RegistryError> {
        self.insert(CreatorRef::Static(creator))
    }

    fn insert(&self, creator: CreatorRef<P>) -> Result<(), RegistryError> {
        let key = creator.get().key().to_owned();
        if key.is_empty() {
            return Err(RegistryError::EmptyKey { kind: self.kind });
        }

        let mut creators = self.creators.write();
        if self.frozen.load(Ordering::Acquire) {
            return Err(RegistryError::Frozen {
                kind: self.kind,
                key,
            });
        }
        if creators.contains_key(&key) {
            return Err(RegistryError::DuplicateRegistration {
                kind: self.kind,
                key,
            });
        }

        tracing::debug!(kind = self.kind, key = %key, "creator registered");
        creators.insert(key, creator);
        Ok(())
    }

    /// Installs every statically submitted registration of type `R`.
    ///
    /// Returns the number of creators installed.
    ///
    /// # Panics
    ///
    /// Panics if a submitted creator collides with an existing key, reports an
    /// empty key, or the registry is already frozen. Two crates claiming the
    /// same key is a startup-fatal condition.
    pub fn install<R>(&self) -> usize
    where
        R: Registrar<P> + inventory::Collect,
    {
        let mut installed = 0;
        for registration in inventory::iter::<R> {
            if let Err(error) = self.register_static(registration.creator()) {
                tracing::error!(kind = self.kind, %error, "static registration failed");
                panic!("static registration failed: {error}");
            }
            installed += 1;
        }

        tracing::info!(
            kind = self.kind,
            installed,
            "static registrations installed"
        );
        installed
    }

    /// Returns whether a creator is registered under `key`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.creators.read().contains_key(key)
    }

    /// Builds a new product using the creator registered under `key`.
    ///
    /// The first call freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownKey`] if nothing is registered under `key`.
    pub fn create(&self, key: &str) -> Result<Box<P>, RegistryError> {
        self.freeze();

        // Clone the handle out so the lock is not held while the creator runs.
        let creator = self
            .creators
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownKey {
                kind: self.kind,
                key: key.to_owned(),
            })?;

        Ok(creator.get().create())
    }

    /// Returns all registered keys in insertion order.
    ///
    /// Insertion order of static registrations depends on link order, so the
    /// result is only suitable for display.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        self.creators.read().keys().cloned().collect()
    }

    /// Returns the number of registered creators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creators.read().len()
    }

    /// Returns true if no creators are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creators.read().is_empty()
    }

    /// Freezes the registry. Idempotent.
    pub fn freeze(&self) {
        if !self.frozen.swap(true, Ordering::AcqRel) {
            tracing::info!(kind = self.kind, entries = self.len(), "registry frozen");
        }
    }

    /// Returns whether the registry has been frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Removes every registration and unfreezes the registry.
    ///
    /// Only available to tests; production registries are never reset.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn reset(&self) {
        self.creators.write().clear();
        self.frozen.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creator::FnCreator;

    trait Animal: Send + Sync {
        fn sound(&self) -> &'static str;
    }

    struct Dog;
    impl Animal for Dog {
        fn sound(&self) -> &'static str {
            "woof"
        }
    }

    struct Cat;
    impl Animal for Cat {
        fn sound(&self) -> &'static str {
            "meow"
        }
    }

    fn dog() -> Box<dyn Animal> {
        Box::new(Dog)
    }

    fn cat() -> Box<dyn Animal> {
        Box::new(Cat)
    }

    static STATIC_DOG: FnCreator<dyn Animal> = FnCreator::new("Dog", dog);

    #[test]
    fn new_registry_is_empty_and_unfrozen() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(!registry.is_frozen());
        assert_eq!(registry.kind(), "animal");
    }

    #[test]
    fn register_then_create() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        registry.register(FnCreator::new("Dog", dog)).unwrap();

        assert!(registry.has("Dog"));
        assert!(!registry.has("Cat"));
        assert_eq!(registry.create("Dog").unwrap().sound(), "woof");
    }

    #[test]
    fn static_and_shared_creators_coexist() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        registry.register_static(&STATIC_DOG).unwrap();
        registry
            .register_shared(Arc::new(FnCreator::new("Cat", cat)))
            .unwrap();

        assert_eq!(registry.all_keys(), vec!["Dog", "Cat"]);
        assert_eq!(registry.create("Cat").unwrap().sound(), "meow");
        assert_eq!(registry.create("Dog").unwrap().sound(), "woof");
    }

    #[test]
    fn empty_key_rejected() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        let result = registry.register(FnCreator::new("", dog));
        assert_eq!(result, Err(RegistryError::EmptyKey { kind: "animal" }));
        assert!(registry.is_empty());
    }

    #[test]
    fn create_freezes_registry() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        registry.register(FnCreator::new("Dog", dog)).unwrap();

        let _ = registry.create("Dog").unwrap();
        assert!(registry.is_frozen());
    }

    #[test]
    fn failed_create_still_freezes() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        let result = registry.create("Missing");
        assert!(matches!(result, Err(RegistryError::UnknownKey { .. })));
        assert!(registry.is_frozen());
    }

    #[test]
    fn freeze_is_idempotent() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        registry.freeze();
        registry.freeze();
        assert!(registry.is_frozen());
    }

    #[test]
    fn reset_clears_and_unfreezes() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        registry.register(FnCreator::new("Dog", dog)).unwrap();
        registry.freeze();

        registry.reset();

        assert!(registry.is_empty());
        assert!(!registry.is_frozen());
        registry.register(FnCreator::new("Cat", cat)).unwrap();
        assert_eq!(registry.all_keys(), vec!["Cat"]);
    }

    #[test]
    fn debug_lists_keys() {
        let registry: Registry<dyn Animal> = Registry::new("animal");
        registry.register(FnCreator::new("Dog", dog)).unwrap();
        let debug = format!("{registry:?}");
        assert!(debug.contains("animal"));
        assert!(debug.contains("Dog"));
    }
}
