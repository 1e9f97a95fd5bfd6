//! I/O modules: metadata lookup, mask extent reading, raster clipping

pub mod metadata;
pub mod mask;
pub mod raster;

// Re-export main types
pub use metadata::MtlReader;
pub use mask::{ShapefileMaskReader, VectorExtentReader};
pub use raster::{GdalClipEngine, RasterClipEngine};
