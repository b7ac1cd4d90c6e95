use crate::error::LocatorError;
use crate::locator::ResourceLocator;
use crate::settings::Settings;
use crate::stream::ResourceStream;
use keel_registry::Creator;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

/// Locator that opens identifiers as file paths.
///
/// # Settings
///
/// | Setting | Default | Meaning |
/// |---------|---------|---------|
/// | `base_path` | none | Directory identifiers resolve against; escapes are rejected. |
///
/// # Example
///
/// ```no_run
/// use keel_resource::locator::ResourceLocator;
/// use keel_resource::locators::FileSystemLocator;
///
/// let locator = FileSystemLocator::with_base_path("/data/loops");
/// let stream = locator.locate("1ubq.loops").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileSystemLocator {
    base_path: Option<PathBuf>,
}

impl FileSystemLocator {
    /// Registry key of this locator.
    pub const KEY: &'static str = "FileSystem";

    /// Setting naming the base directory.
    pub const BASE_PATH: &'static str = "base_path";

    /// Creates a locator resolving identifiers as given.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a locator resolving identifiers against `base_path`.
    #[must_use]
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    /// Returns the configured base directory.
    #[must_use]
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Resolves an identifier to a path, enforcing the base directory.
    fn resolve(&self, identifier: &str) -> Result<PathBuf, LocatorError> {
        let Some(base) = &self.base_path else {
            return Ok(PathBuf::from(identifier));
        };

        let resolved = base.join(identifier);
        let outside = || LocatorError::OutsideBase {
            identifier: identifier.to_string(),
            base: base.clone(),
        };

        match (resolved.canonicalize(), base.canonicalize()) {
            (Ok(canonical), Ok(base)) => {
                if canonical.starts_with(&base) {
                    Ok(resolved)
                } else {
                    Err(outside())
                }
            }
            // Nothing to canonicalize yet; the open reports the missing file.
            _ => {
                let escapes = Path::new(identifier).components().any(|c| {
                    matches!(
                        c,
                        Component::ParentDir | Component::RootDir | Component::Prefix(_)
                    )
                });
                if escapes { Err(outside()) } else { Ok(resolved) }
            }
        }
    }
}

impl ResourceLocator for FileSystemLocator {
    fn configure(&mut self, settings: &Settings) -> Result<(), LocatorError> {
        for (key, value) in settings.iter() {
            match key {
                Self::BASE_PATH if value.trim().is_empty() => {
                    return Err(LocatorError::invalid_setting(key, "must not be empty"));
                }
                Self::BASE_PATH => self.base_path = Some(PathBuf::from(value)),
                _ => {
                    return Err(LocatorError::invalid_setting(
                        key,
                        "unknown FileSystem locator setting",
                    ));
                }
            }
        }
        Ok(())
    }

    fn locate(&self, identifier: &str) -> Result<ResourceStream, LocatorError> {
        let path = self.resolve(identifier)?;
        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LocatorError::NotFound {
                identifier: identifier.to_string(),
                path: path.clone(),
            },
            _ => LocatorError::Io {
                identifier: identifier.to_string(),
                source,
            },
        })?;

        tracing::debug!(identifier, path = %path.display(), "opened resource file");
        Ok(ResourceStream::new(identifier, BufReader::new(file)))
    }
}

/// Creator for [`FileSystemLocator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemLocatorCreator;

impl Creator<dyn ResourceLocator> for FileSystemLocatorCreator {
    fn key(&self) -> &str {
        FileSystemLocator::KEY
    }

    fn create(&self) -> Box<dyn ResourceLocator> {
        Box::new(FileSystemLocator::new())
    }
}
