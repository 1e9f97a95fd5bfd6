//! landclip CLI entrypoint.
//!
//! Parses arguments, wires the GDAL-backed mask reader and clip engine into
//! the pipeline and maps any failure to a message on stderr and exit code 1.

use clap::Parser;
use env_logger::Env;
use landclip::core::paths::split_commas;
use landclip::core::ClipPipeline;
use landclip::io::{GdalClipEngine, ShapefileMaskReader};
use landclip::types::ClipRequest;
use std::path::PathBuf;

/// Clip GeoTIFF bands from Landsat scenes to the extent of a mask polygon.
#[derive(Parser, Debug)]
#[command(name = "landclip", version, disable_version_flag = true)]
struct Cli {
    /// Input directory to scan for *.tif files
    #[arg(short = 'i', long = "idir")]
    input_dir: PathBuf,

    /// Output directory to write clipped *.tif files
    #[arg(short = 'o', long = "odir")]
    output_dir: PathBuf,

    /// Source coordinate reference system, e.g. "EPSG:32615"
    #[arg(short = 'c', long = "source_crs")]
    source_crs: String,

    /// Mask file (*.shp) providing the clip extent
    #[arg(short = 'm', long = "mask")]
    mask: PathBuf,

    /// List of datasets (comma separated), e.g. "QA_PIXEL,SR_B4"
    #[arg(short = 'd', long = "datasets")]
    datasets: String,

    /// Pattern to filter files to process
    #[arg(short = 'p', long = "pattern")]
    pattern: Option<String>,

    /// Label for output files, inserted before the extension
    #[arg(short = 'n', long = "label")]
    label: Option<String>,

    /// Verbose logging, including input path decomposition
    #[arg(short = 'g', long = "debug")]
    debug: bool,

    /// Show version information
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    log::info!("landclip - clip GeoTIFF bands from Landsat scenes");
    log::info!("input directory: {}", cli.input_dir.display());
    log::info!("output directory: {}", cli.output_dir.display());
    log::info!("source CRS: {}", cli.source_crs);
    log::info!("mask: {}", cli.mask.display());

    let datasets = split_commas(&cli.datasets);
    log::info!("datasets: {}", datasets.join(" "));

    let request = ClipRequest {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir,
        default_crs: cli.source_crs,
        mask_path: cli.mask,
        datasets,
        pattern: cli.pattern,
        label: cli.label,
    };

    let pipeline = ClipPipeline::new(ShapefileMaskReader, GdalClipEngine);
    pipeline.run(&request)?;
    Ok(())
}
