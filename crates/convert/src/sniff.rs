//! Content-based type identification.
//!
//! The extension only says which check to run. A file is classified as the
//! kind its extension claims only when its content confirms it:
//!
//! | Extension | Confirmation |
//! |-----------|--------------|
//! | `pptx` | zip container listing `ppt/presentation.xml` |
//! | `ppt`  | leading compound-file signature bytes |
//! | `zip`  | structurally valid zip container |
//! | `pdf`  | parses as a PDF document |
//! | `ps`   | none, the extension is trusted |
//!
//! Anything else, and any check that fails or errors, is `Unknown`.

use crate::pdf;
use docimg_archive::{is_zip, ZipContainer};
use docimg_core::{declared_extension, DocumentKind, FileCandidate, Result, TypeSets};
use std::path::Path;

/// Classifies files into document kinds without modifying them.
#[derive(Debug, Clone, Default)]
pub struct Sniffer {
    types: TypeSets,
}

impl Sniffer {
    /// Create a sniffer that only inspects kinds listed as convertible in `types`.
    pub fn new(types: TypeSets) -> Self {
        Self { types }
    }

    /// Classify the file at `path`.
    pub fn sniff(&self, path: &Path) -> FileCandidate {
        FileCandidate::new(path, self.sniff_kind(path))
    }

    /// Classify the file at `path`, returning only the kind.
    pub fn sniff_kind(&self, path: &Path) -> DocumentKind {
        let claimed = DocumentKind::from_extension(declared_extension(path));
        if !self.types.is_convertible(claimed) {
            log::debug!(
                "{}: extension does not name a convertible kind",
                path.display()
            );
            return DocumentKind::Unknown;
        }

        match confirm(path, claimed) {
            Ok(true) => {
                log::debug!("{}: confirmed as {}", path.display(), claimed);
                claimed
            }
            Ok(false) => {
                log::debug!("{}: content is not {}", path.display(), claimed);
                DocumentKind::Unknown
            }
            Err(e) => {
                log::debug!(
                    "{}: inspection as {} failed, treating as unknown: {}",
                    path.display(),
                    claimed,
                    e
                );
                DocumentKind::Unknown
            }
        }
    }
}

/// Check whether the content of `path` really is `claimed`.
fn confirm(path: &Path, claimed: DocumentKind) -> Result<bool> {
    match claimed {
        DocumentKind::Pptx => Ok(ZipContainer::open(path)?.is_presentation()),
        DocumentKind::Ppt => docimg_ppt::has_compound_signature(path),
        DocumentKind::Zip => is_zip(path),
        DocumentKind::Pdf => pdf::is_pdf(path),
        DocumentKind::Ps => Ok(true),
        DocumentKind::Unknown => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use docimg_ppt::OLE_SIGNATURE;
    use std::fs;

    fn sniff(path: &Path) -> DocumentKind {
        Sniffer::default().sniff_kind(path)
    }

    #[test]
    fn test_pptx_requires_presentation_part() {
        let dir = tempfile::tempdir().unwrap();

        let real = dir.path().join("deck.pptx");
        fixtures::write_pptx(&real);
        assert_eq!(sniff(&real), DocumentKind::Pptx);

        let plain = dir.path().join("renamed.pptx");
        fixtures::write_zip(&plain, &[("ppt/slides/slide1.xml", "<p:sld/>")]);
        assert_eq!(sniff(&plain), DocumentKind::Unknown);

        let garbage = dir.path().join("garbage.pptx");
        fs::write(&garbage, b"definitely not a zip").unwrap();
        assert_eq!(sniff(&garbage), DocumentKind::Unknown);
    }

    #[test]
    fn test_ppt_requires_signature() {
        let dir = tempfile::tempdir().unwrap();

        let real = dir.path().join("deck.ppt");
        fixtures::write_compound(&real);
        assert_eq!(sniff(&real), DocumentKind::Ppt);

        let bare = dir.path().join("bare.ppt");
        fs::write(&bare, OLE_SIGNATURE).unwrap();
        assert_eq!(sniff(&bare), DocumentKind::Ppt);

        let textual = dir.path().join("textual.ppt");
        fs::write(&textual, br"\xd0\xcf\x11\xe0\xa1\xb1").unwrap();
        assert_eq!(sniff(&textual), DocumentKind::Unknown);

        let pptx_named_ppt = dir.path().join("modern.ppt");
        fixtures::write_pptx(&pptx_named_ppt);
        assert_eq!(sniff(&pptx_named_ppt), DocumentKind::Unknown);
    }

    #[test]
    fn test_zip_requires_valid_container() {
        let dir = tempfile::tempdir().unwrap();

        let real = dir.path().join("images.zip");
        fixtures::write_zip(&real, &[("a.jpg", "jpeg")]);
        assert_eq!(sniff(&real), DocumentKind::Zip);

        let pdf_named_zip = dir.path().join("report.zip");
        fixtures::write_pdf(&pdf_named_zip, 1);
        assert_eq!(sniff(&pdf_named_zip), DocumentKind::Unknown);
    }

    #[test]
    fn test_pdf_requires_parse() {
        let dir = tempfile::tempdir().unwrap();

        let real = dir.path().join("doc.pdf");
        fixtures::write_pdf(&real, 1);
        assert_eq!(sniff(&real), DocumentKind::Pdf);

        let fake = dir.path().join("fake.pdf");
        fs::write(&fake, b"hello").unwrap();
        assert_eq!(sniff(&fake), DocumentKind::Unknown);
    }

    #[test]
    fn test_ps_trusts_extension() {
        let dir = tempfile::tempdir().unwrap();
        let ps = dir.path().join("page.ps");
        fs::write(&ps, b"anything at all").unwrap();
        assert_eq!(sniff(&ps), DocumentKind::Ps);
    }

    #[test]
    fn test_other_extensions_are_unknown() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["notes.docx", "README", "deck.PPTX", "scan.PDF"] {
            let path = dir.path().join(name);
            fixtures::write_pptx(&path);
            assert_eq!(sniff(&path), DocumentKind::Unknown, "{name}");
        }
    }

    #[test]
    fn test_missing_file_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(sniff(&dir.path().join("gone.zip")), DocumentKind::Unknown);
        assert_eq!(sniff(&dir.path().join("gone.ps")), DocumentKind::Ps);
    }

    #[test]
    fn test_sniff_does_not_modify_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        fixtures::write_pptx(&path);
        let before = fs::read(&path).unwrap();

        let candidate = Sniffer::default().sniff(&path);

        assert_eq!(candidate.sniffed_type(), DocumentKind::Pptx);
        assert_eq!(candidate.declared_extension(), "pptx");
        assert_eq!(fs::read(&path).unwrap(), before);
    }
}
