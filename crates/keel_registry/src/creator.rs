//! Creator trait for pluggable products.
//!
//! A [`Creator`] knows how to build exactly one concrete product type and which
//! key it is registered under. The product type `P` is usually a trait object
//! such as `dyn ResourceLoader`, so a registry can hand out boxed instances
//! without its callers naming the concrete type.

use core::fmt;

/// A stateless factory for one concrete product type.
///
/// Creators are immutable and shared across threads, so they must be
/// `Send + Sync + 'static`. Unit structs work well and can be submitted
/// statically with [`submit!`](crate::submit).
///
/// # Example
///
/// ```
/// use keel_registry::Creator;
///
/// trait Shape: Send + Sync {
///     fn sides(&self) -> u32;
/// }
///
/// struct Square;
/// impl Shape for Square {
///     fn sides(&self) -> u32 {
///         4
///     }
/// }
///
/// struct SquareCreator;
///
/// impl Creator<dyn Shape> for SquareCreator {
///     fn key(&self) -> &str {
///         "Square"
///     }
///
///     fn create(&self) -> Box<dyn Shape> {
///         Box::new(Square)
///     }
/// }
///
/// assert_eq!(SquareCreator.create().sides(), 4);
/// ```
pub trait Creator<P: ?Sized>: Send + Sync + 'static {
    /// Returns the registration key. Must be non-empty.
    fn key(&self) -> &str;

    /// Builds a new, exclusively owned product instance.
    fn create(&self) -> Box<P>;
}

/// A [`Creator`] backed by a key and a plain function pointer.
///
/// Useful for runtime registration where a dedicated creator struct would be
/// noise. Construction is `const`, so it can also be submitted statically.
///
/// # Example
///
/// ```
/// use keel_registry::{Creator, FnCreator};
///
/// fn build() -> Box<str> {
///     "built".into()
/// }
///
/// let creator: FnCreator<str> = FnCreator::new("Text", build);
/// assert_eq!(creator.key(), "Text");
/// assert_eq!(&*creator.create(), "built");
/// ```
pub struct FnCreator<P: ?Sized> {
    key: &'static str,
    build: fn() -> Box<P>,
}

impl<P: ?Sized> FnCreator<P> {
    /// Creates a creator registered under `key` that calls `build`.
    #[must_use]
    pub const fn new(key: &'static str, build: fn() -> Box<P>) -> Self {
        Self { key, build }
    }
}

impl<P: ?Sized + 'static> Creator<P> for FnCreator<P> {
    fn key(&self) -> &str {
        self.key
    }

    fn create(&self) -> Box<P> {
        (self.build)()
    }
}

impl<P: ?Sized> fmt::Debug for FnCreator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCreator").field("key", &self.key).finish()
    }
}
