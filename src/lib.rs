//! landclip: Batch Clipping of Landsat Bands to a Mask Extent
//!
//! This library clips GeoTIFF band files from Landsat scenes to the inflated
//! bounding extent of a single-feature vector mask, resolving the coordinate
//! reference system per scene from the Landsat MTL metadata file.

pub mod types;
pub mod io;
pub mod core;

// Re-export main types and functions for easier access
pub use types::{
    BoundingBox, ClipError, ClipRequest, ClipResult, PathParts, SceneMetadata,
};

pub use io::{GdalClipEngine, MtlReader, RasterClipEngine, ShapefileMaskReader, VectorExtentReader};
pub use crate::core::{ClipPipeline, CrsResolver};
