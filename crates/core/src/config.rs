//! Immutable conversion settings.
//!
//! Built once at start-up and handed to the sniffer, the archive filter,
//! and the dispatcher explicitly.

use crate::types::DocumentKind;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

/// Default time an external backend may run before it is killed.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(300);

/// Output file name pattern handed to the rasterizer; `%d` is the page number.
pub const SLIDE_FILE_PATTERN: &str = "Slide%d.jpg";

/// The document kinds accepted for conversion and the image kinds kept from archives.
#[derive(Debug, Clone)]
pub struct TypeSets {
    convertible: BTreeSet<DocumentKind>,
    acceptable_images: BTreeSet<String>,
    case_sensitive_images: bool,
}

impl Default for TypeSets {
    fn default() -> Self {
        Self {
            convertible: DocumentKind::KNOWN.into_iter().collect(),
            acceptable_images: ["jpg", "jpeg", "png", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            case_sensitive_images: true,
        }
    }
}

impl TypeSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict conversion to `kinds`.
    pub fn with_convertible(mut self, kinds: impl IntoIterator<Item = DocumentKind>) -> Self {
        self.convertible = kinds
            .into_iter()
            .filter(|kind| *kind != DocumentKind::Unknown)
            .collect();
        self
    }

    /// Match archive entry extensions regardless of case (`c.PNG` is kept).
    pub fn with_case_insensitive_images(mut self) -> Self {
        self.case_sensitive_images = false;
        self
    }

    /// Whether a sniffed kind may enter conversion. `Unknown` never does.
    pub fn is_convertible(&self, kind: DocumentKind) -> bool {
        kind != DocumentKind::Unknown && self.convertible.contains(&kind)
    }

    /// Whether an archive entry with this extension is an accepted image.
    pub fn is_acceptable_image(&self, ext: &str) -> bool {
        if self.case_sensitive_images {
            self.acceptable_images.contains(ext)
        } else {
            self.acceptable_images
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        }
    }
}

/// Settings for the PostScript/PDF rasterizer process.
#[derive(Debug, Clone)]
pub struct RasterizerConfig {
    pub program: PathBuf,
    pub device: String,
    pub jpeg_quality: u8,
    pub resolution_dpi: u32,
    pub text_alpha_bits: u8,
    pub graphics_alpha_bits: u8,
    pub timeout: Duration,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        let program = if cfg!(windows) { "gswin64c" } else { "gs" };
        Self {
            program: PathBuf::from(program),
            device: "jpeg".to_string(),
            jpeg_quality: 80,
            resolution_dpi: 96,
            text_alpha_bits: 4,
            graphics_alpha_bits: 4,
            timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }
}

impl RasterizerConfig {
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Settings for the headless office engine used to export slides.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub program: PathBuf,
    pub timeout: Duration,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("soffice"),
            timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }
}

impl ExporterConfig {
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Everything a converter needs, gathered in one place.
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    pub types: TypeSets,
    pub rasterizer: RasterizerConfig,
    pub exporter: ExporterConfig,
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(mut self, types: TypeSets) -> Self {
        self.types = types;
        self
    }

    pub fn with_rasterizer(mut self, rasterizer: RasterizerConfig) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn with_exporter(mut self, exporter: ExporterConfig) -> Self {
        self.exporter = exporter;
        self
    }

    /// Apply one timeout to every external backend.
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.rasterizer.timeout = timeout;
        self.exporter.timeout = timeout;
        self
    }
}
