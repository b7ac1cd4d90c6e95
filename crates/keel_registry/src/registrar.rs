//! Static self-registration via `inventory`.
//!
//! Each product kind declares one registration type with [`registrar!`].
//! Crates contributing a product submit an entry with [`submit!`]; the linker
//! collects every entry, and [`Registry::install`](crate::Registry::install)
//! drains them into the registry on first use. New product types can be added
//! in new crates without touching the registry.
//!
//! # Example
//!
//! ```
//! use keel_registry::{Creator, Registry, registrar, submit};
//!
//! pub trait Codec: Send + Sync {
//!     fn name(&self) -> &'static str;
//! }
//!
//! registrar! {
//!     /// Static registrations for codecs.
//!     pub struct CodecRegistration => dyn Codec;
//! }
//!
//! struct Raw;
//! impl Codec for Raw {
//!     fn name(&self) -> &'static str {
//!         "raw"
//!     }
//! }
//!
//! struct RawCreator;
//! impl Creator<dyn Codec> for RawCreator {
//!     fn key(&self) -> &str {
//!         "Raw"
//!     }
//!
//!     fn create(&self) -> Box<dyn Codec> {
//!         Box::new(Raw)
//!     }
//! }
//!
//! submit!(CodecRegistration, RawCreator);
//!
//! fn main() {
//!     let registry: Registry<dyn Codec> = Registry::new("codec");
//!     assert_eq!(registry.install::<CodecRegistration>(), 1);
//!     assert_eq!(registry.create("Raw").unwrap().name(), "raw");
//! }
//! ```

use crate::creator::Creator;

/// A statically submitted registration entry for product type `P`.
///
/// Implemented by the types declared with [`registrar!`]; users rarely
/// implement it by hand.
pub trait Registrar<P: ?Sized + 'static>: Sync + 'static {
    /// Returns the creator carried by this entry.
    fn creator(&self) -> &'static dyn Creator<P>;
}

/// Declares a registration type for one product kind.
///
/// Expands to a tuple struct holding `&'static dyn Creator<P>`, its
/// [`Registrar`] implementation, and the `inventory::collect!` call.
#[macro_export]
macro_rules! registrar {
    ($(#[$meta:meta])* $vis:vis struct $name:ident => $product:ty;) => {
        $(#[$meta])*
        $vis struct $name(pub &'static dyn $crate::Creator<$product>);

        impl $crate::Registrar<$product> for $name {
            fn creator(&self) -> &'static dyn $crate::Creator<$product> {
                self.0
            }
        }

        $crate::inventory::collect!($name);
    };
}

/// Submits a creator under a registration type declared with [`registrar!`].
///
/// The creator must be borrowable for `'static`: a unit struct, or the path
/// of a `static` holding e.g. a [`FnCreator`](crate::FnCreator).
#[macro_export]
macro_rules! submit {
    ($registration:path, $creator:expr) => {
        $crate::inventory::submit! {
            $registration(&$creator)
        }
    };
}
