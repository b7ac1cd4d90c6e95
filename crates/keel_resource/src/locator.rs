//! Locators resolve identifiers into streams.

use crate::error::LocatorError;
use crate::settings::Settings;
use crate::stream::ResourceStream;

/// Resolves an identifier into a [`ResourceStream`].
///
/// Locators are created fresh for every construction through the locator
/// registry, configured with the record's locator settings, then asked for a
/// stream. Locators do not retry: a missing source is reported immediately.
///
/// # Example
///
/// ```
/// use keel_resource::error::LocatorError;
/// use keel_resource::locator::ResourceLocator;
/// use keel_resource::stream::ResourceStream;
///
/// struct Upper;
///
/// impl ResourceLocator for Upper {
///     fn locate(&self, identifier: &str) -> Result<ResourceStream, LocatorError> {
///         Ok(ResourceStream::from_bytes(identifier, identifier.to_uppercase()))
///     }
/// }
///
/// let stream = Upper.locate("abc").unwrap();
/// assert_eq!(stream.into_string().unwrap(), "ABC");
/// ```
pub trait ResourceLocator: Send + Sync {
    /// Applies locator-specific settings.
    ///
    /// The default implementation accepts no settings at all.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidSetting`] for unknown or malformed
    /// settings.
    fn configure(&mut self, settings: &Settings) -> Result<(), LocatorError> {
        match settings.keys().next() {
            Some(key) => Err(LocatorError::invalid_setting(
                key,
                "this locator accepts no settings",
            )),
            None => Ok(()),
        }
    }

    /// Opens the source named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing or unreadable.
    fn locate(&self, identifier: &str) -> Result<ResourceStream, LocatorError>;
}
