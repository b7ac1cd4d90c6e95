//! Loaders turn streams and options into resources.

use crate::error::LoaderError;
use crate::options::{BasicResourceOptions, ResourceOptions};
use crate::resource::Resource;
use crate::stream::ResourceStream;

/// Converts a [`ResourceStream`] plus [`ResourceOptions`] into a [`Resource`].
///
/// Loaders must be deterministic: the same stream content and options always
/// produce a structurally equal resource.
///
/// # Example
///
/// ```
/// use keel_resource::error::LoaderError;
/// use keel_resource::loader::ResourceLoader;
/// use keel_resource::options::{BasicResourceOptions, ResourceOptions};
/// use keel_resource::resource::Resource;
/// use keel_resource::stream::ResourceStream;
///
/// #[derive(Debug, PartialEq)]
/// struct Lines(Vec<String>);
/// impl Resource for Lines {}
///
/// struct LinesLoader;
///
/// impl ResourceLoader for LinesLoader {
///     fn load(
///         &self,
///         _resource_name: &str,
///         stream: ResourceStream,
///         _options: &mut dyn ResourceOptions,
///     ) -> Result<Box<dyn Resource>, LoaderError> {
///         let content = stream.into_string()?;
///         Ok(Box::new(Lines(content.lines().map(String::from).collect())))
///     }
/// }
///
/// let mut options = BasicResourceOptions::new();
/// let resource = LinesLoader
///     .load("demo", ResourceStream::from_bytes("demo", "a\nb"), &mut options)
///     .unwrap();
/// assert_eq!(*resource.downcast::<Lines>().unwrap(), Lines(vec!["a".into(), "b".into()]));
/// ```
pub trait ResourceLoader: Send + Sync {
    /// Builds a resource from the stream.
    ///
    /// `options` belongs to this load only and may be mutated.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed content, failed validation, unexpected
    /// options, or a read failure.
    fn load(
        &self,
        resource_name: &str,
        stream: ResourceStream,
        options: &mut dyn ResourceOptions,
    ) -> Result<Box<dyn Resource>, LoaderError>;

    /// Returns fresh options of the type this loader expects.
    ///
    /// Used when a record does not name an options type.
    fn default_options(&self) -> Box<dyn ResourceOptions> {
        Box::new(BasicResourceOptions::new())
    }
}

/// Downcasts options to the concrete type a loader expects.
///
/// # Errors
///
/// Returns [`LoaderError::UnexpectedOptions`] naming both Rust types if the
/// options are another type.
///
/// # Example
///
/// ```
/// use keel_resource::loader::expect_options;
/// use keel_resource::options::{BasicResourceOptions, ResourceOptions};
///
/// let mut options = BasicResourceOptions::new();
/// let options: &mut dyn ResourceOptions = &mut options;
/// assert!(expect_options::<BasicResourceOptions>(options).is_ok());
/// ```
pub fn expect_options<T: ResourceOptions>(
    options: &mut dyn ResourceOptions,
) -> Result<&mut T, LoaderError> {
    let actual = options.concrete_type();
    options
        .downcast_mut::<T>()
        .ok_or(LoaderError::UnexpectedOptions {
            expected: core::any::type_name::<T>(),
            actual,
        })
}
