//! PDF structure check.

use docimg_core::{Error, Result};
use lopdf::Document;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Whether the file at `path` parses as a PDF document.
///
/// A readable file that fails to parse yields `Ok(false)`; only failing to
/// open the file is an error.
pub fn is_pdf(path: &Path) -> Result<bool> {
    Ok(load(path)?.is_some())
}

/// Number of pages of the PDF at `path`.
pub fn page_count(path: &Path) -> Result<usize> {
    load(path)?
        .map(|doc| doc.get_pages().len())
        .ok_or_else(|| Error::PdfError(format!("{} is not a PDF document", path.display())))
}

fn load(path: &Path) -> Result<Option<Document>> {
    let file = File::open(path)?;
    match Document::load_from(BufReader::new(file)) {
        Ok(doc) => Ok(Some(doc)),
        Err(e) => {
            log::debug!("{} did not parse as PDF: {}", path.display(), e);
            Ok(None)
        }
    }
}
