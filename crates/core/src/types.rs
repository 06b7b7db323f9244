//! Domain types for identifying documents and reporting conversions.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The kind of document a file was confirmed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Legacy PPT (OLE/CFB binary).
    Ppt,
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Portable Document Format.
    Pdf,
    /// PostScript.
    Ps,
    /// Generic zip archive.
    Zip,
    /// Content could not be confirmed as any known kind.
    Unknown,
}

impl DocumentKind {
    /// Every kind that can be claimed by an extension.
    pub const KNOWN: [DocumentKind; 5] = [
        DocumentKind::Ppt,
        DocumentKind::Pptx,
        DocumentKind::Pdf,
        DocumentKind::Ps,
        DocumentKind::Zip,
    ];

    /// Map an extension onto the kind it claims. Matching is exact, so
    /// `PDF` does not claim [`DocumentKind::Pdf`].
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "ppt" => Self::Ppt,
            "pptx" => Self::Pptx,
            "pdf" => Self::Pdf,
            "ps" => Self::Ps,
            "zip" => Self::Zip,
            _ => Self::Unknown,
        }
    }

    /// The canonical extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ppt => "ppt",
            Self::Pptx => "pptx",
            Self::Pdf => "pdf",
            Self::Ps => "ps",
            Self::Zip => "zip",
            Self::Unknown => "",
        }
    }

    /// The conversion strategy that handles this kind, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            Self::Ppt | Self::Pptx => Some(Strategy::SlideExport),
            Self::Pdf | Self::Ps => Some(Strategy::Rasterize),
            Self::Zip => Some(Strategy::ArchiveFilter),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            other => f.write_str(other.extension()),
        }
    }
}

/// How a confirmed document is turned into images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Presentation slides exported by an office engine.
    SlideExport,
    /// Pages rendered by a PostScript/PDF rasterizer.
    Rasterize,
    /// Image entries copied out of a zip container.
    ArchiveFilter,
}

/// A file submitted for conversion, together with what sniffing made of it.
///
/// Built once per request and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    path: PathBuf,
    declared_extension: String,
    sniffed_type: DocumentKind,
}

impl FileCandidate {
    /// Create a candidate for `path` whose content was confirmed as `sniffed_type`.
    pub fn new(path: impl Into<PathBuf>, sniffed_type: DocumentKind) -> Self {
        let path = path.into();
        let declared_extension = declared_extension(&path).to_string();
        Self {
            path,
            declared_extension,
            sniffed_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extension text as written in the file name (empty when there is none).
    pub fn declared_extension(&self) -> &str {
        &self.declared_extension
    }

    pub fn sniffed_type(&self) -> DocumentKind {
        self.sniffed_type
    }
}

/// Extension of `path` as written: the text after the last `.` of the file
/// name, or empty when the name has no extension.
pub fn declared_extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

/// Coarse reason a conversion did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input is not a file or output is not a directory.
    InvalidInput,
    /// Sniffing could not confirm a convertible kind.
    UnrecognizedType,
    /// A backend returned a failure status or timed out.
    BackendFailure,
    /// The zip container could not be opened or written out.
    ExtractionFailure,
}

/// Terminal result of one conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    succeeded: bool,
    /// Confirmed kind of the input, when sniffing got that far.
    kind: Option<DocumentKind>,
    failure: Option<FailureKind>,
    /// Human-readable failure detail.
    detail: Option<String>,
}

impl ConversionOutcome {
    pub fn success(kind: DocumentKind) -> Self {
        Self {
            succeeded: true,
            kind: Some(kind),
            failure: None,
            detail: None,
        }
    }

    pub fn failure(
        kind: Option<DocumentKind>,
        failure: FailureKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            succeeded: false,
            kind,
            failure: Some(failure),
            detail: Some(detail.into()),
        }
    }

    /// Failure outcome describing `err`.
    pub fn from_error(kind: Option<DocumentKind>, err: &Error) -> Self {
        Self::failure(kind, err.failure_kind(), err.to_string())
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        self.kind
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// Container-level facts gathered while probing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "container", rename_all = "snake_case")]
pub enum DocumentDetails {
    /// Zip-based presentation.
    Presentation { slide_count: usize },
    /// Legacy compound-binary file.
    CompoundFile {
        has_powerpoint_document: bool,
        has_current_user: bool,
    },
    /// PDF document.
    Pdf { page_count: usize },
    /// Generic zip archive.
    Archive { entries: usize, image_entries: usize },
    /// Nothing to report.
    None,
}
