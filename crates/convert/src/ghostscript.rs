//! Ghostscript-backed rasterizer.

use crate::backend::Rasterizer;
use crate::process;
use docimg_core::{RasterizerConfig, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

const BACKEND_NAME: &str = "ghostscript";

/// Rasterizes PDF and PostScript documents by running Ghostscript.
#[derive(Debug, Clone, Default)]
pub struct GhostscriptRasterizer {
    config: RasterizerConfig,
}

impl GhostscriptRasterizer {
    pub fn new(config: RasterizerConfig) -> Self {
        Self { config }
    }

    /// Command-line arguments for rendering `document` to `output_pattern`.
    ///
    /// Paths are passed as separate arguments, so embedded spaces need no quoting.
    pub fn arguments(&self, document: &Path, output_pattern: &Path) -> Vec<OsString> {
        let config = &self.config;
        let mut output_file = OsString::from("-sOutputFile=");
        output_file.push(output_pattern);

        vec![
            "-dNOPAUSE".into(),
            "-dBATCH".into(),
            "-dSAFER".into(),
            format!("-sDEVICE={}", config.device).into(),
            format!("-dJPEG={}", config.jpeg_quality).into(),
            format!("-r{}", config.resolution_dpi).into(),
            format!("-dTextAlphaBits={}", config.text_alpha_bits).into(),
            format!("-dGraphicsAlphaBits={}", config.graphics_alpha_bits).into(),
            output_file,
            document.as_os_str().to_owned(),
        ]
    }
}

impl Rasterizer for GhostscriptRasterizer {
    fn rasterize(&self, document: &Path, output_pattern: &Path) -> Result<()> {
        let mut command = Command::new(&self.config.program);
        command.args(self.arguments(document, output_pattern));
        process::run(command, BACKEND_NAME, self.config.timeout)
    }
}
