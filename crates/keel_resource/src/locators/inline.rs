use crate::error::LocatorError;
use crate::locator::ResourceLocator;
use crate::stream::ResourceStream;
use keel_registry::Creator;

/// Locator whose identifier is the content.
///
/// Lets small resources live directly in a configuration record.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineLocator;

impl InlineLocator {
    /// Registry key of this locator.
    pub const KEY: &'static str = "Inline";
}

impl ResourceLocator for InlineLocator {
    fn locate(&self, identifier: &str) -> Result<ResourceStream, LocatorError> {
        Ok(ResourceStream::from_bytes("<inline>", identifier))
    }
}

/// Creator for [`InlineLocator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineLocatorCreator;

impl Creator<dyn ResourceLocator> for InlineLocatorCreator {
    fn key(&self) -> &str {
        InlineLocator::KEY
    }

    fn create(&self) -> Box<dyn ResourceLocator> {
        Box::new(InlineLocator)
    }
}
