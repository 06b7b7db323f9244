//! Conversion dispatcher.
//!
//! One call to [`Converter::convert`] runs a fresh, strictly linear pass:
//!
//! ```text
//! Start -> TypeChecked -> Dispatched -> Success | Failure
//!                     \-> Rejected
//! ```
//!
//! Preconditions are checked before sniffing. A kind outside the convertible
//! set is rejected without touching any backend. Otherwise exactly one
//! backend runs once and its status becomes the outcome.

use crate::backend::{Rasterizer, SlideExporter};
use crate::ghostscript::GhostscriptRasterizer;
use crate::office::OfficeSlideExporter;
use crate::probe::{self, Probe};
use crate::sniff::Sniffer;
use docimg_archive::ArchiveFilter;
use docimg_core::config::SLIDE_FILE_PATTERN;
use docimg_core::{
    ConversionOutcome, ConverterConfig, DocumentKind, Error, FileCandidate, Result, Strategy,
    TypeSets,
};
use std::path::Path;

/// Turns one input file into a folder of images.
pub struct Converter {
    types: TypeSets,
    sniffer: Sniffer,
    filter: ArchiveFilter,
    exporter: Box<dyn SlideExporter>,
    rasterizer: Box<dyn Rasterizer>,
}

impl Converter {
    /// Create a converter using Ghostscript and a headless office suite.
    pub fn new(config: &ConverterConfig) -> Self {
        let exporter = OfficeSlideExporter::new(
            config.exporter.clone(),
            GhostscriptRasterizer::new(config.rasterizer.clone()),
        );
        let rasterizer = GhostscriptRasterizer::new(config.rasterizer.clone());
        Self::with_backends(config.types.clone(), Box::new(exporter), Box::new(rasterizer))
    }

    /// Create a converter with caller-supplied backends.
    pub fn with_backends(
        types: TypeSets,
        exporter: Box<dyn SlideExporter>,
        rasterizer: Box<dyn Rasterizer>,
    ) -> Self {
        Self {
            sniffer: Sniffer::new(types.clone()),
            filter: ArchiveFilter::new(types.clone()),
            types,
            exporter,
            rasterizer,
        }
    }

    /// Identify `input` and describe its container without converting it.
    pub fn probe(&self, input: &Path) -> Probe {
        probe::probe(&self.sniffer, &self.types, input)
    }

    /// Convert `input` into images inside the existing directory `output_dir`.
    pub fn convert(&self, input: &Path, output_dir: &Path) -> ConversionOutcome {
        let outcome = self.run(input, output_dir);
        if outcome.succeeded() {
            log::info!(
                "Converted {} into {}",
                input.display(),
                output_dir.display()
            );
        } else {
            log::info!(
                "Conversion of {} failed: {}",
                input.display(),
                outcome.detail().unwrap_or("unknown error")
            );
        }
        outcome
    }

    fn run(&self, input: &Path, output_dir: &Path) -> ConversionOutcome {
        // Start
        if let Err(e) = check_preconditions(input, output_dir) {
            return ConversionOutcome::from_error(None, &e);
        }

        // TypeChecked
        let candidate = self.sniffer.sniff(input);
        let kind = candidate.sniffed_type();
        let strategy = match self.select_strategy(kind) {
            Some(strategy) => strategy,
            None => {
                // Rejected
                let err = Error::UnrecognizedType(format!(
                    "{} could not be confirmed as a convertible document",
                    input.display()
                ));
                return ConversionOutcome::from_error(Some(kind), &err);
            }
        };

        // Dispatched
        match self.dispatch(&candidate, strategy, output_dir) {
            Ok(()) => ConversionOutcome::success(kind),
            Err(e) => ConversionOutcome::from_error(Some(kind), &e),
        }
    }

    fn select_strategy(&self, kind: DocumentKind) -> Option<Strategy> {
        if self.types.is_convertible(kind) {
            kind.strategy()
        } else {
            None
        }
    }

    fn dispatch(
        &self,
        candidate: &FileCandidate,
        strategy: Strategy,
        output_dir: &Path,
    ) -> Result<()> {
        let input = candidate.path();
        log::debug!(
            "Dispatching {} ({}) via {:?}",
            input.display(),
            candidate.sniffed_type(),
            strategy
        );

        match strategy {
            Strategy::SlideExport => self.exporter.export(input, output_dir),
            Strategy::Rasterize => self
                .rasterizer
                .rasterize(input, &output_dir.join(SLIDE_FILE_PATTERN)),
            Strategy::ArchiveFilter => {
                let report = self.filter.extract_images(input, output_dir)?;
                log::info!(
                    "Extracted {} image(s), skipped {}, refused {}",
                    report.extracted.len(),
                    report.skipped,
                    report.rejected.len()
                );
                Ok(())
            }
        }
    }
}

fn check_preconditions(input: &Path, output_dir: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(Error::InvalidInput(format!(
            "{} is not a file",
            input.display()
        )));
    }
    if !output_dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "{} is not a directory",
            output_dir.display()
        )));
    }
    Ok(())
}
