use crate::error::LocatorError;
use crate::locator::ResourceLocator;
use crate::stream::ResourceStream;
use keel_registry::Creator;

/// Locator that always returns an empty stream.
///
/// Useful for loaders that build their resource entirely from options.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLocator;

impl NullLocator {
    /// Registry key of this locator.
    pub const KEY: &'static str = "NullLocator";
}

impl ResourceLocator for NullLocator {
    fn locate(&self, identifier: &str) -> Result<ResourceStream, LocatorError> {
        Ok(ResourceStream::empty(identifier))
    }
}

/// Creator for [`NullLocator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLocatorCreator;

impl Creator<dyn ResourceLocator> for NullLocatorCreator {
    fn key(&self) -> &str {
        NullLocator::KEY
    }

    fn create(&self) -> Box<dyn ResourceLocator> {
        Box::new(NullLocator)
    }
}
