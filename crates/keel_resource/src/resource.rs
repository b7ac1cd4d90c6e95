//! The constructed product of the pipeline.
//!
//! [`Resource`] is deliberately thin: the concrete shape of a resource is
//! defined by whichever crate contributes its loader. Callers receive a
//! `Box<dyn Resource>` and downcast it to the type they expect.
//!
//! # Example
//!
//! ```
//! use keel_resource::resource::Resource;
//!
//! #[derive(Debug, PartialEq)]
//! struct ScoreWeights {
//!     terms: Vec<(String, f64)>,
//! }
//!
//! impl Resource for ScoreWeights {}
//!
//! let boxed: Box<dyn Resource> = Box::new(ScoreWeights { terms: Vec::new() });
//! assert!(boxed.is::<ScoreWeights>());
//!
//! let weights = boxed.downcast::<ScoreWeights>().unwrap();
//! assert!(weights.terms.is_empty());
//! ```

use core::fmt;
use downcast_rs::{DowncastSync, impl_downcast};

/// A constructed domain object handed back by a
/// [`ResourceLoader`](crate::loader::ResourceLoader).
///
/// Implement this marker for every type a loader produces. Ownership of the
/// boxed resource moves to the caller; loaders, locators and registries keep
/// no reference to it.
pub trait Resource: DowncastSync + fmt::Debug {
    /// Returns the concrete type name for diagnostics.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl_downcast!(sync Resource);
