//! Core pipeline modules

pub mod paths;
pub mod crs;
pub mod pipeline;

// Re-export main types
pub use crs::{epsg_from_utm_zone, parse_epsg, CrsResolver};
pub use paths::{has_suffix, matches_pattern, split_commas, split_path};
pub use pipeline::{ClipPipeline, EXTENT_MARGIN};
