//! Read-only inspection of a file: what it is and what its container holds.

use crate::pdf;
use crate::sniff::Sniffer;
use docimg_archive::ZipContainer;
use docimg_core::{DocumentDetails, DocumentKind, FileCandidate, Result, TypeSets};
use serde::Serialize;
use std::path::Path;

/// Result of probing a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Probe {
    #[serde(flatten)]
    pub candidate: FileCandidate,
    pub details: DocumentDetails,
}

/// Sniff `path` and gather container details for the confirmed kind.
pub fn probe(sniffer: &Sniffer, types: &TypeSets, path: &Path) -> Probe {
    let candidate = sniffer.sniff(path);
    let details = match gather_details(candidate.sniffed_type(), types, path) {
        Ok(details) => details,
        Err(e) => {
            log::warn!("Could not read details of {}: {}", path.display(), e);
            DocumentDetails::None
        }
    };
    Probe { candidate, details }
}

fn gather_details(kind: DocumentKind, types: &TypeSets, path: &Path) -> Result<DocumentDetails> {
    let details = match kind {
        DocumentKind::Pptx => DocumentDetails::Presentation {
            slide_count: ZipContainer::open(path)?.count_slides()?,
        },
        DocumentKind::Ppt => docimg_ppt::inspect(path)?.into(),
        DocumentKind::Pdf => DocumentDetails::Pdf {
            page_count: pdf::page_count(path)?,
        },
        DocumentKind::Zip => {
            let container = ZipContainer::open(path)?;
            DocumentDetails::Archive {
                entries: container.len(),
                image_entries: container.count_image_entries(types),
            }
        }
        DocumentKind::Ps | DocumentKind::Unknown => DocumentDetails::None,
    };
    Ok(details)
}
