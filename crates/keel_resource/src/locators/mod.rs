//! Built-in locators.
//!
//! | Key | Locator | Behavior |
//! |-----|---------|----------|
//! | `"FileSystem"` | [`FileSystemLocator`] | Opens the identifier as a file path |
//! | `"NullLocator"` | [`NullLocator`] | Returns an empty stream |
//! | `"Inline"` | [`InlineLocator`] | Uses the identifier itself as content |
//!
//! All three are submitted to the process-wide locator registry.

mod file_system;
mod inline;
mod null;

pub use file_system::{FileSystemLocator, FileSystemLocatorCreator};
pub use inline::{InlineLocator, InlineLocatorCreator};
pub use null::{NullLocator, NullLocatorCreator};
