//! Conversion backends.
//!
//! Both backends are opaque to the dispatcher: they receive a path and a
//! destination, and report success or a failure status.

use docimg_core::Result;
use std::path::Path;

/// Exports every slide of a presentation as a JPEG image into a directory.
pub trait SlideExporter {
    /// Export `presentation` into `output_dir`. File naming is up to the engine.
    fn export(&self, presentation: &Path, output_dir: &Path) -> Result<()>;
}

/// Renders each page of a PDF or PostScript document to a JPEG image.
pub trait Rasterizer {
    /// Render `document` to files named after `output_pattern`, where `%d`
    /// is replaced by the 1-based page number.
    fn rasterize(&self, document: &Path, output_pattern: &Path) -> Result<()>;
}
