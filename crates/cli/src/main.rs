//! CLI tool for converting documents into folders of images.

use anyhow::{Context, Result};
use clap::Parser;
use docimg_convert::Converter;
use docimg_core::{ConverterConfig, ExporterConfig, RasterizerConfig, TypeSets};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Convert a presentation, PDF/PostScript document, or zip of images into a folder of images.
#[derive(Parser, Debug)]
#[command(name = "docimg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file (.ppt, .pptx, .pdf, .ps or .zip)
    input: PathBuf,

    /// Existing directory that receives the images
    #[arg(required_unless_present = "probe")]
    output_dir: Option<PathBuf>,

    /// Identify the input and describe its container without converting
    #[arg(long)]
    probe: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Ghostscript executable
    #[arg(long, value_name = "PATH")]
    gs: Option<PathBuf>,

    /// Headless office executable used to export slides
    #[arg(long, value_name = "PATH")]
    soffice: Option<PathBuf>,

    /// Seconds an external converter may run before it is killed
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Keep archive images regardless of extension case (e.g. `photo.PNG`)
    #[arg(long)]
    ignore_image_case: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> ConverterConfig {
        let mut types = TypeSets::new();
        if self.ignore_image_case {
            types = types.with_case_insensitive_images();
        }

        let mut rasterizer = RasterizerConfig::default();
        if let Some(gs) = &self.gs {
            rasterizer = rasterizer.with_program(gs);
        }

        let mut exporter = ExporterConfig::default();
        if let Some(soffice) = &self.soffice {
            exporter = exporter.with_program(soffice);
        }

        let mut config = ConverterConfig::new()
            .with_types(types)
            .with_rasterizer(rasterizer)
            .with_exporter(exporter);
        if let Some(secs) = self.timeout {
            config = config.with_backend_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let converter = Converter::new(&args.config());

    if args.probe {
        let probe = converter.probe(&args.input);
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&probe).context("Failed to serialize probe result")?
            );
        } else {
            println!("{}: {}", args.input.display(), probe.candidate.sniffed_type());
            println!("{:?}", probe.details);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let output_dir = args
        .output_dir
        .as_deref()
        .context("An output directory is required")?;

    if args.verbose {
        eprintln!("Processing: {}", args.input.display());
    }

    let outcome = converter.convert(&args.input, output_dir);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?
        );
    } else if outcome.succeeded() {
        if args.verbose {
            eprintln!("Written to: {}", output_dir.display());
        }
    } else {
        eprintln!(
            "Error processing {}: {}",
            args.input.display(),
            outcome.detail().unwrap_or("conversion failed")
        );
    }

    Ok(if outcome.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
