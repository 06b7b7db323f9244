//! Error types for document-to-image conversion.

use crate::types::FailureKind;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while identifying or converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not a regular file or the output is not a directory.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Content inspection could not confirm any convertible kind.
    #[error("Unsupported or unrecognized file type: {0}")]
    UnrecognizedType(String),

    /// An external conversion backend reported a failure status.
    #[error("{backend} failed with exit code {code}")]
    Backend {
        backend: &'static str,
        /// Process exit code, or -1 when terminated by a signal.
        code: i32,
    },

    /// An external conversion backend exited cleanly but left no usable output.
    #[error("{backend} produced no output: {detail}")]
    MissingOutput {
        backend: &'static str,
        detail: String,
    },

    /// An external conversion backend did not finish in time and was killed.
    #[error("{backend} timed out after {seconds} seconds")]
    Timeout { backend: &'static str, seconds: u64 },

    /// The zip container could not be read or an entry could not be written.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Failed to open, read, or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP container error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX parts).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// OLE/CFB container error (for PPT).
    #[error("OLE/CFB error: {0}")]
    CfbError(String),

    /// PDF parsing error.
    #[error("PDF error: {0}")]
    PdfError(String),
}

impl Error {
    /// Collapse this error into the coarse failure taxonomy reported with an outcome.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::InvalidInput(_) => FailureKind::InvalidInput,
            Error::UnrecognizedType(_) => FailureKind::UnrecognizedType,
            Error::Backend { .. } | Error::MissingOutput { .. } | Error::Timeout { .. } => {
                FailureKind::BackendFailure
            }
            Error::Extraction(_) | Error::ZipError(_) => FailureKind::ExtractionFailure,
            // Container errors only escape the sniffer through a backend or
            // the archive filter, so anything left is a backend-side problem.
            Error::IoError(_) | Error::XmlError(_) | Error::CfbError(_) | Error::PdfError(_) => {
                FailureKind::BackendFailure
            }
        }
    }
}
