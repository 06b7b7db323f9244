//! Zip container checks.
//!
//! Answers "is this a zip at all?" and "is this zip a presentation?"
//! without trusting the file name.

use docimg_core::{Error, Result, TypeSets};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::filter::ArchiveEntry;

/// Part present in every PPTX package.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Check whether the file at `path` is a structurally valid zip container.
///
/// A readable file that is not a zip yields `Ok(false)`; only I/O failures
/// are errors.
pub fn is_zip(path: &Path) -> Result<bool> {
    let file = File::open(path)?;
    match ZipArchive::new(BufReader::new(file)) {
        Ok(_) => Ok(true),
        Err(ZipError::Io(e)) => Err(Error::IoError(e)),
        Err(e) => {
            log::debug!("{} is not a zip container: {}", path.display(), e);
            Ok(false)
        }
    }
}

/// An opened zip container.
pub struct ZipContainer<R> {
    archive: ZipArchive<R>,
}

impl ZipContainer<BufReader<File>> {
    /// Open the zip container at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> ZipContainer<R> {
    /// Open a zip container from a reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;
        Ok(Self { archive })
    }

    /// Number of entries in the central directory.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the central directory lists no entries.
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Entry names exactly as stored.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }

    /// Whether an entry with exactly this name is listed.
    pub fn has_entry(&self, name: &str) -> bool {
        self.archive.file_names().any(|n| n == name)
    }

    /// Whether the container carries the main PPTX presentation part.
    pub fn is_presentation(&self) -> bool {
        self.has_entry(PRESENTATION_PART)
    }

    /// Count entries whose extension is an accepted image kind.
    pub fn count_image_entries(&self, types: &TypeSets) -> usize {
        self.entry_names()
            .map(ArchiveEntry::from_name)
            .filter(|entry| entry.is_image(types))
            .count()
    }

    /// Count slides listed in the presentation part's slide id list.
    pub fn count_slides(&mut self) -> Result<usize> {
        let content = self.read_entry_to_string(PRESENTATION_PART)?;
        count_slide_ids(&content)
    }

    /// Read a text entry from the archive.
    fn read_entry_to_string(&mut self, name: &str) -> Result<String> {
        let mut file = self
            .archive
            .by_name(name)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", name, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", name, e)))?;

        Ok(content)
    }

    pub(crate) fn archive_mut(&mut self) -> &mut ZipArchive<R> {
        &mut self.archive
    }
}

/// Count `sldId` elements in presentation XML.
fn count_slide_ids(xml_content: &str) -> Result<usize> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let mut count = 0;
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if local_name(e.name().as_ref()) == b"sldId" {
                    count += 1;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation part: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(count)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const PRESENTATION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
  <p:sldIdLst>
    <p:sldId id="256" r:id="rId2"/>
    <p:sldId id="257" r:id="rId3"/>
    <p:sldId id="258" r:id="rId4"/>
  </p:sldIdLst>
</p:presentation>"#;

    #[test]
    fn test_is_zip_accepts_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.zip");
        std::fs::write(&path, zip_bytes(&[("a.jpg", "jpeg")])).unwrap();
        assert!(is_zip(&path).unwrap());
    }

    #[test]
    fn test_is_zip_rejects_pdf_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actually-a.zip");
        let pdf = b"%PDF-1.4\n1 0 obj\n<< >>\nendobj\ntrailer\n<< >>\n%%EOF\n";
        std::fs::write(&path, pdf).unwrap();
        assert!(!is_zip(&path).unwrap());
    }

    #[test]
    fn test_is_zip_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.zip");
        std::fs::write(&path, b"").unwrap();
        assert!(!is_zip(&path).unwrap());
    }

    #[test]
    fn test_is_zip_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_zip(&dir.path().join("nope.zip")).is_err());
    }

    #[test]
    fn test_presentation_part_detection() {
        let pptx = zip_bytes(&[
            ("[Content_Types].xml", "<Types/>"),
            (PRESENTATION_PART, PRESENTATION_XML),
        ]);
        let container = ZipContainer::from_reader(Cursor::new(pptx)).unwrap();
        assert!(container.is_presentation());

        let plain = zip_bytes(&[("ppt/slides/slide1.xml", "<p:sld/>")]);
        let container = ZipContainer::from_reader(Cursor::new(plain)).unwrap();
        assert!(!container.is_presentation());
    }

    #[test]
    fn test_count_slides() {
        let pptx = zip_bytes(&[(PRESENTATION_PART, PRESENTATION_XML)]);
        let mut container = ZipContainer::from_reader(Cursor::new(pptx)).unwrap();
        assert_eq!(container.count_slides().unwrap(), 3);
    }

    #[test]
    fn test_count_slides_without_part() {
        let plain = zip_bytes(&[("a.jpg", "jpeg")]);
        let mut container = ZipContainer::from_reader(Cursor::new(plain)).unwrap();
        assert!(matches!(container.count_slides(), Err(Error::ZipError(_))));
    }

    #[test]
    fn test_count_image_entries() {
        let archive = zip_bytes(&[
            ("a.jpg", "1"),
            ("b.txt", "2"),
            ("c.PNG", "3"),
            ("d/e.gif", "4"),
        ]);
        let container = ZipContainer::from_reader(Cursor::new(archive)).unwrap();
        assert_eq!(container.len(), 4);
        assert!(!container.is_empty());
        assert_eq!(container.count_image_entries(&TypeSets::new()), 2);
        assert_eq!(
            container.count_image_entries(&TypeSets::new().with_case_insensitive_images()),
            3
        );
    }

    #[test]
    fn test_empty_archive() {
        let container = ZipContainer::from_reader(Cursor::new(zip_bytes(&[]))).unwrap();
        assert!(container.is_empty());
        assert_eq!(container.count_image_entries(&TypeSets::new()), 0);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sldId"), b"sldId");
        assert_eq!(local_name(b"sldId"), b"sldId");
    }
}
