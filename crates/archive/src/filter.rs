//! Image extraction from zip containers.
//!
//! Walks the central directory and writes out only entries whose extension
//! is an accepted image kind, keeping each entry's stored relative path.
//! Entries whose path would land outside the output directory are refused.

use docimg_core::{Error, Result, TypeSets};
use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use crate::container::ZipContainer;

/// One entry considered during the extraction walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry<'a> {
    /// Name exactly as stored in the archive.
    pub name_in_archive: &'a str,
    /// Text after the last `.` of the entry's file name, case preserved.
    pub extension: Option<&'a str>,
}

impl<'a> ArchiveEntry<'a> {
    pub fn from_name(name_in_archive: &'a str) -> Self {
        let extension = Path::new(name_in_archive)
            .extension()
            .and_then(|e| e.to_str());
        Self {
            name_in_archive,
            extension,
        }
    }

    pub fn is_image(&self, types: &TypeSets) -> bool {
        !self.name_in_archive.ends_with('/')
            && self
                .extension
                .map(|ext| types.is_acceptable_image(ext))
                .unwrap_or(false)
    }
}

/// What an extraction walk did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Files written, relative to the output directory, in archive order.
    pub extracted: Vec<PathBuf>,
    /// Entries that were not accepted images.
    pub skipped: usize,
    /// Image entries refused because their path escapes the output directory.
    pub rejected: Vec<String>,
}

/// Copies accepted image entries out of zip containers.
#[derive(Debug, Clone, Default)]
pub struct ArchiveFilter {
    types: TypeSets,
}

impl ArchiveFilter {
    /// Create a filter accepting the image kinds in `types`.
    pub fn new(types: TypeSets) -> Self {
        Self { types }
    }

    /// Extract every accepted image entry of the zip at `zip_path` into `output_dir`.
    ///
    /// Succeeds when the archive opens, even if nothing matched. A failed write
    /// stops the walk with [`Error::Extraction`]; files already written stay
    /// on disk.
    pub fn extract_images(&self, zip_path: &Path, output_dir: &Path) -> Result<ExtractionReport> {
        let mut container = ZipContainer::open(zip_path).map_err(|e| {
            Error::Extraction(format!(
                "Failed to open ZIP archive {}: {}",
                zip_path.display(),
                e
            ))
        })?;
        self.extract_from(&mut container, output_dir)
    }

    /// Extract accepted image entries from an already opened container.
    pub fn extract_from<R: Read + Seek>(
        &self,
        container: &mut ZipContainer<R>,
        output_dir: &Path,
    ) -> Result<ExtractionReport> {
        let mut report = ExtractionReport::default();
        let archive = container.archive_mut();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(|e| {
                Error::Extraction(format!("Failed to read entry at index {}: {}", i, e))
            })?;

            let name = file.name().to_string();
            let entry = ArchiveEntry::from_name(&name);
            if file.is_dir() || !entry.is_image(&self.types) {
                log::debug!("Skipping archive entry '{}'", name);
                report.skipped += 1;
                continue;
            }

            let relative = match file.enclosed_name() {
                Some(path) => path.to_owned(),
                None => {
                    log::warn!(
                        "Refusing archive entry '{}': path escapes the output directory",
                        name
                    );
                    report.rejected.push(name);
                    continue;
                }
            };

            let output_path = output_dir.join(&relative);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Extraction(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }

            let mut output_file = File::create(&output_path).map_err(|e| {
                Error::Extraction(format!(
                    "Failed to create output file {}: {}",
                    output_path.display(),
                    e
                ))
            })?;
            io::copy(&mut file, &mut output_file).map_err(|e| {
                Error::Extraction(format!("Failed to extract '{}': {}", name, e))
            })?;

            log::debug!("Extracted '{}' to {}", name, output_path.display());
            report.extracted.push(relative);
        }

        Ok(report)
    }
}
