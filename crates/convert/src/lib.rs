//! Content sniffing and conversion dispatch.
//!
//! [`Converter`] identifies an input file by its content, then hands it to
//! the matching backend: slide export for presentations, rasterizing for
//! PDF and PostScript, or image extraction for zip archives.

pub mod backend;
pub mod dispatch;
pub mod ghostscript;
pub mod office;
pub mod pdf;
pub mod probe;
pub mod process;
pub mod sniff;

#[cfg(test)]
mod fixtures;

pub use backend::{Rasterizer, SlideExporter};
pub use dispatch::Converter;
pub use ghostscript::GhostscriptRasterizer;
pub use office::OfficeSlideExporter;
pub use probe::Probe;
pub use sniff::Sniffer;
