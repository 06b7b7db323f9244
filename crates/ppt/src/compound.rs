//! Legacy compound-binary (OLE/CFB) file checks.
//!
//! A `.ppt` file is confirmed by its leading signature bytes alone. The
//! compound-file directory is only walked for diagnostics, so a file with a
//! valid signature but a damaged directory is still a PPT.

use cfb::CompoundFile;
use docimg_core::{DocumentDetails, Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Leading bytes of every compound-binary file.
pub const OLE_SIGNATURE: [u8; 6] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1];

const POWERPOINT_DOCUMENT_STREAM: &str = "/PowerPoint Document";
const CURRENT_USER_STREAM: &str = "/Current User";

/// Whether `bytes` begins with the compound-file signature.
pub fn matches_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&OLE_SIGNATURE)
}

/// Read the first bytes of the file at `path` and compare them with the
/// compound-file signature. Files shorter than the signature do not match.
pub fn has_compound_signature(path: &Path) -> Result<bool> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(OLE_SIGNATURE.len());
    file.take(OLE_SIGNATURE.len() as u64).read_to_end(&mut head)?;
    Ok(matches_signature(&head))
}

/// Streams found in a compound file's directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompoundInfo {
    /// Whether the main `PowerPoint Document` stream is present.
    pub has_powerpoint_document: bool,
    /// Whether the `Current User` stream is present.
    pub has_current_user: bool,
}

impl From<CompoundInfo> for DocumentDetails {
    fn from(info: CompoundInfo) -> Self {
        DocumentDetails::CompoundFile {
            has_powerpoint_document: info.has_powerpoint_document,
            has_current_user: info.has_current_user,
        }
    }
}

/// Open the compound file at `path` and report which PowerPoint streams it holds.
pub fn inspect(path: &Path) -> Result<CompoundInfo> {
    let file = File::open(path)?;
    inspect_reader(BufReader::new(file))
}

/// Report which PowerPoint streams a compound file read from `reader` holds.
pub fn inspect_reader<R: Read + Seek>(reader: R) -> Result<CompoundInfo> {
    let cfb = CompoundFile::open(reader)
        .map_err(|e| Error::CfbError(format!("Failed to open CFB container: {}", e)))?;

    let mut info = CompoundInfo::default();
    for entry in cfb.walk() {
        match entry.path().to_string_lossy().as_ref() {
            POWERPOINT_DOCUMENT_STREAM => info.has_powerpoint_document = true,
            CURRENT_USER_STREAM => info.has_current_user = true,
            _ => {}
        }
    }

    if !info.has_powerpoint_document {
        log::warn!(
            "Missing 'PowerPoint Document' stream. This may be a different Office format."
        );
    } else if !info.has_current_user {
        log::warn!("Missing 'Current User' stream. File may be an older PPT format variant.");
    }

    Ok(info)
}
