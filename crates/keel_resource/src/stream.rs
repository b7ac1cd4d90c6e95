//! Single-use readable streams produced by locators.

use core::fmt;
use std::io::{self, BufRead, Cursor, Read};

/// A readable source handed from a locator to a loader.
///
/// A stream is exclusively owned and consumed by value, so a loader reads it
/// exactly once. It remembers the identifier it was located from for
/// diagnostics.
///
/// # Example
///
/// ```
/// use keel_resource::stream::ResourceStream;
///
/// let stream = ResourceStream::from_bytes("inline", "LOOP 1 10\n");
/// assert_eq!(stream.identifier(), "inline");
/// assert_eq!(stream.into_string().unwrap(), "LOOP 1 10\n");
/// ```
pub struct ResourceStream {
    identifier: String,
    reader: Box<dyn BufRead + Send>,
}

impl ResourceStream {
    /// Wraps a buffered reader.
    pub fn new(identifier: impl Into<String>, reader: impl BufRead + Send + 'static) -> Self {
        Self {
            identifier: identifier.into(),
            reader: Box::new(reader),
        }
    }

    /// Creates a stream over an in-memory buffer.
    pub fn from_bytes(identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(identifier, Cursor::new(bytes.into()))
    }

    /// Creates a stream with no content.
    pub fn empty(identifier: impl Into<String>) -> Self {
        Self::new(identifier, io::empty())
    }

    /// Returns the identifier this stream was located from.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Reads the remaining content as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is not valid UTF-8.
    pub fn into_string(mut self) -> io::Result<String> {
        let mut content = String::new();
        self.reader.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Reads the remaining content as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut content = Vec::new();
        self.reader.read_to_end(&mut content)?;
        Ok(content)
    }
}

impl Read for ResourceStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for ResourceStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amount: usize) {
        self.reader.consume(amount);
    }
}

impl fmt::Debug for ResourceStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStream")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}
