//! Zip container support: structural checks, PPTX part inspection, and
//! extraction of image entries.

pub mod container;
pub mod filter;

pub use container::{is_zip, ZipContainer, PRESENTATION_PART};
pub use filter::{ArchiveEntry, ArchiveFilter, ExtractionReport};
