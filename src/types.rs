use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Axis-aligned bounding extent in projected (UTM) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Grow the box by `margin` map units on every side.
    ///
    /// The caller keeps the margin below half the original extent;
    /// min < max is not re-checked here.
    pub fn inflate(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// Decomposed file path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParts {
    /// Parent directory, empty when the path has no separator
    pub directory: String,
    /// Filename with extension
    pub basename: String,
    /// Filename without extension
    pub stem: String,
    /// Extension with leading dot, empty when the basename has none
    pub extension: String,
}

/// Projection fields extracted from a Landsat MTL metadata file
///
/// The zero value (empty name, zone 0) means the metadata was not found or
/// could not be extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub projection_name: String,
    pub utm_zone: i32,
}

impl SceneMetadata {
    /// Both fields extracted, metadata usable for CRS resolution
    pub fn is_complete(&self) -> bool {
        !self.projection_name.is_empty() && self.utm_zone != 0
    }
}

/// One clipping run, immutable once built from the command line
#[derive(Debug, Clone)]
pub struct ClipRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Default CRS string, e.g. "EPSG:32615"; per-scene metadata may
    /// override it for the rest of the run
    pub default_crs: String,
    /// Single-feature vector polygon providing the clip extent
    pub mask_path: PathBuf,
    /// Band names in declared order, duplicates allowed
    pub datasets: Vec<String>,
    /// Optional substring filter on candidate file names
    pub pattern: Option<String>,
    /// Optional suffix inserted before the extension of output file names
    pub label: Option<String>,
}

/// Error types for the clipping pipeline
#[derive(Debug, thiserror::Error)]
pub enum ClipError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("path not found: {0}")]
    Path(String),

    #[error("metadata error: {0}")]
    Metadata(String),

    #[error("mask extent error: {0}")]
    Extent(String),

    #[error("CRS error: {0}")]
    Crs(String),

    #[error("clip error: {0}")]
    Clip(String),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}

/// Result type for clipping operations
pub type ClipResult<T> = Result<T, ClipError>;
