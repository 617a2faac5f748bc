//! Failures that end a conversion run.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// No PDFium shared library could be bound.
    #[error("PDFium library unavailable ({0}); set PDFIUM_LIB_DIR to its directory")]
    Library(String),

    #[error("failed to open PDF {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("failed to render page {page}: {reason}")]
    Render { page: usize, reason: String },

    #[error("failed to encode page {page} as JPEG: {source}")]
    Encode {
        page: usize,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path line could not be written to the output stream.
    #[error("failed to report output path: {0}")]
    Output(#[source] std::io::Error),
}
