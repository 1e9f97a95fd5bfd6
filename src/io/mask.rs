//! Mask polygon extent reading

use crate::types::{BoundingBox, ClipError, ClipResult};
use gdal::vector::LayerAccess;
use gdal::Dataset;
use std::path::Path;

/// Capability to read the bounding envelope of a vector mask.
///
/// The pipeline only needs the envelope of the first feature; implementations
/// over a real vector stack live here, fakes live in the tests.
pub trait VectorExtentReader {
    fn read_first_feature_envelope(&self, path: &Path) -> ClipResult<BoundingBox>;
}

/// Mask extent reader over GDAL/OGR vector datasets (shapefiles and friends)
pub struct ShapefileMaskReader;

impl VectorExtentReader for ShapefileMaskReader {
    /// Read the axis-aligned envelope of the first feature in the mask.
    ///
    /// The mask is expected to carry exactly one feature; any further
    /// features are ignored. Missing layer, feature or geometry are extent
    /// errors.
    fn read_first_feature_envelope(&self, path: &Path) -> ClipResult<BoundingBox> {
        let dataset = Dataset::open(path)
            .map_err(|e| ClipError::Extent(format!("cannot read mask {}: {}", path.display(), e)))?;

        let mut layer = dataset
            .layer(0)
            .map_err(|_| ClipError::Extent(format!("no layer in mask {}", path.display())))?;

        let feature = layer
            .features()
            .next()
            .ok_or_else(|| ClipError::Extent(format!("no features in mask {}", path.display())))?;

        let geometry = feature
            .geometry()
            .ok_or_else(|| ClipError::Extent(format!("no geometry in mask {}", path.display())))?;

        let envelope = geometry.envelope();
        let bbox = BoundingBox {
            min_x: envelope.MinX,
            min_y: envelope.MinY,
            max_x: envelope.MaxX,
            max_y: envelope.MaxY,
        };
        log::debug!(
            "mask envelope: min_x={}, min_y={}, max_x={}, max_y={}",
            bbox.min_x,
            bbox.min_y,
            bbox.max_x,
            bbox.max_y
        );

        Ok(bbox)
    }
}
