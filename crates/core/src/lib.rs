//! Core domain types, error taxonomy, and configuration for turning
//! documents into folders of images.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConverterConfig, ExporterConfig, RasterizerConfig, TypeSets};
pub use error::{Error, Result};
pub use types::{
    declared_extension, ConversionOutcome, DocumentDetails, DocumentKind, FailureKind,
    FileCandidate, Strategy,
};
