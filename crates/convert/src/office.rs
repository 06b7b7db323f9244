//! Slide export through a headless office suite.
//!
//! The presentation is first converted to PDF in a scratch directory, then
//! the PDF is handed to a [`Rasterizer`] which writes `Slide<N>.jpg` files.

use crate::backend::{Rasterizer, SlideExporter};
use crate::ghostscript::GhostscriptRasterizer;
use crate::process;
use docimg_core::config::SLIDE_FILE_PATTERN;
use docimg_core::{Error, ExporterConfig, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

const BACKEND_NAME: &str = "soffice";

/// Exports presentations with `soffice --headless`.
#[derive(Debug, Clone, Default)]
pub struct OfficeSlideExporter<R = GhostscriptRasterizer> {
    config: ExporterConfig,
    rasterizer: R,
}

impl<R: Rasterizer> OfficeSlideExporter<R> {
    pub fn new(config: ExporterConfig, rasterizer: R) -> Self {
        Self { config, rasterizer }
    }

    /// Command-line arguments converting `presentation` to PDF inside `scratch_dir`.
    pub fn arguments(&self, presentation: &Path, scratch_dir: &Path) -> Vec<OsString> {
        vec![
            "--headless".into(),
            "--convert-to".into(),
            "pdf".into(),
            "--outdir".into(),
            scratch_dir.as_os_str().to_owned(),
            presentation.as_os_str().to_owned(),
        ]
    }
}

/// Where the office suite writes the PDF for `presentation`.
fn converted_pdf_path(presentation: &Path, scratch_dir: &Path) -> Result<PathBuf> {
    let stem = presentation.file_stem().ok_or_else(|| {
        Error::InvalidInput(format!("{} has no file name", presentation.display()))
    })?;
    let mut name = stem.to_os_string();
    name.push(".pdf");
    Ok(scratch_dir.join(name))
}

impl<R: Rasterizer> SlideExporter for OfficeSlideExporter<R> {
    fn export(&self, presentation: &Path, output_dir: &Path) -> Result<()> {
        let scratch = tempfile::Builder::new()
            .prefix("docimg-export-")
            .tempdir()?;

        let mut command = Command::new(&self.config.program);
        command.args(self.arguments(presentation, scratch.path()));
        process::run(command, BACKEND_NAME, self.config.timeout)?;

        let pdf = converted_pdf_path(presentation, scratch.path())?;
        if !pdf.is_file() {
            return Err(Error::MissingOutput {
                backend: BACKEND_NAME,
                detail: format!("expected {}", pdf.display()),
            });
        }

        log::debug!("Rasterizing exported slides from {}", pdf.display());
        self.rasterizer
            .rasterize(&pdf, &output_dir.join(SLIDE_FILE_PATTERN))
    }
}
