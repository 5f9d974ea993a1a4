//! Error types for the pdfslides library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfslides operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be loaded or parsed.
    #[error("Could not load document: {0}")]
    Load(String),

    /// The PDF rendering engine could not be initialized.
    #[error("PDF engine unavailable: {0}")]
    Engine(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A specific page failed to rasterize. Aborts the whole conversion;
    /// no partial output is produced.
    #[error("Failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },

    /// Encoding a rendered bitmap to PNG/JPEG failed.
    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    /// Assembling or packaging the presentation failed.
    #[error("Presentation assembly error: {0}")]
    Assemble(String),
}

impl Error {
    /// Wrap a per-page render failure.
    pub(crate) fn render(page: u32, reason: impl ToString) -> Self {
        Error::Render {
            page,
            reason: reason.to_string(),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageEncode(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Assemble(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::render(3, "corrupt content stream");
        assert_eq!(
            err.to_string(),
            "Failed to render page 3: corrupt content stream"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
