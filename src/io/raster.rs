//! Windowed GeoTIFF clipping over GDAL

use crate::types::{BoundingBox, ClipError, ClipResult};
use gdal::raster::{GdalDataType, GdalType};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};
use std::path::Path;

/// Capability to crop one raster file to a bounding box and tag its CRS.
///
/// The pipeline is generic over this trait so its control flow is testable
/// without a raster stack.
pub trait RasterClipEngine {
    fn clip(&self, input: &Path, output: &Path, bbox: &BoundingBox, epsg: i32) -> ClipResult<()>;
}

/// Clip engine writing GTiff outputs through GDAL
pub struct GdalClipEngine;

/// Pixel window of a clip operation within the source raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelWindow {
    x_off: isize,
    y_off: isize,
    width: usize,
    height: usize,
}

impl RasterClipEngine for GdalClipEngine {
    /// Crop `input` to the projection window spanned by `bbox` and write it
    /// to `output` tagged with `epsg`.
    ///
    /// The projection window uses the top-left/bottom-right ordering
    /// `[min_x, max_y, max_x, min_y]`, so the Y axis is walked from max to
    /// min. The window is clamped to the source raster; an empty
    /// intersection is an error.
    fn clip(&self, input: &Path, output: &Path, bbox: &BoundingBox, epsg: i32) -> ClipResult<()> {
        if epsg <= 0 {
            return Err(ClipError::Crs(format!("invalid EPSG code {}", epsg)));
        }

        let src = Dataset::open(input)?;
        let geo_transform = src.geo_transform()?;
        let (raster_width, raster_height) = src.raster_size();
        let window = pixel_window(&geo_transform, bbox, raster_width, raster_height)?;
        log::debug!(
            "clip window for {}: offset=({}, {}), size={}x{}",
            input.display(),
            window.x_off,
            window.y_off,
            window.width,
            window.height
        );

        // Shift the origin to the window's upper-left corner
        let mut out_transform = geo_transform;
        out_transform[0] = geo_transform[0] + window.x_off as f64 * geo_transform[1];
        out_transform[3] = geo_transform[3] + window.y_off as f64 * geo_transform[5];

        let band_type = src.rasterband(1)?.band_type();
        match band_type {
            GdalDataType::UInt8 => clip_as::<u8>(&src, output, &window, &out_transform, epsg as u32),
            GdalDataType::UInt16 => clip_as::<u16>(&src, output, &window, &out_transform, epsg as u32),
            GdalDataType::Int16 => clip_as::<i16>(&src, output, &window, &out_transform, epsg as u32),
            GdalDataType::UInt32 => clip_as::<u32>(&src, output, &window, &out_transform, epsg as u32),
            GdalDataType::Int32 => clip_as::<i32>(&src, output, &window, &out_transform, epsg as u32),
            GdalDataType::Float32 => clip_as::<f32>(&src, output, &window, &out_transform, epsg as u32),
            GdalDataType::Float64 => clip_as::<f64>(&src, output, &window, &out_transform, epsg as u32),
            other => Err(ClipError::Clip(format!(
                "unsupported band data type {:?} in {}",
                other,
                input.display()
            ))),
        }
    }
}

/// Create the output dataset and copy every band's window.
///
/// All bands are written with the first band's data type; Landsat ships one
/// band per file, so mixed-type inputs are not a concern here.
fn clip_as<T: Copy + GdalType>(
    src: &Dataset,
    output: &Path,
    window: &PixelWindow,
    out_transform: &[f64; 6],
    epsg: u32,
) -> ClipResult<()> {
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let band_count = src.raster_count();

    let mut dst = driver.create_with_band_type::<T, _>(
        output,
        window.width as isize,
        window.height as isize,
        band_count,
    )?;
    dst.set_geo_transform(out_transform)?;
    dst.set_spatial_ref(&SpatialRef::from_epsg(epsg)?)?;

    for index in 1..=band_count {
        let src_band = src.rasterband(index)?;
        let buffer = src_band.read_as::<T>(
            (window.x_off, window.y_off),
            (window.width, window.height),
            (window.width, window.height),
            None,
        )?;

        let mut dst_band = dst.rasterband(index)?;
        dst_band.write((0, 0), (window.width, window.height), &buffer)?;
        if let Some(nodata) = src_band.no_data_value() {
            dst_band.set_no_data_value(Some(nodata))?;
        }
    }

    Ok(())
}

/// Map a projection window onto source pixels, clamped to the raster.
///
/// Only north-up geotransforms are handled; the window math has no meaning
/// for rotated rasters.
fn pixel_window(
    geo_transform: &[f64; 6],
    bbox: &BoundingBox,
    raster_width: usize,
    raster_height: usize,
) -> ClipResult<PixelWindow> {
    if geo_transform[2] != 0.0 || geo_transform[4] != 0.0 {
        return Err(ClipError::Clip("rotated rasters are not supported".to_string()));
    }
    if geo_transform[1] <= 0.0 || geo_transform[5] >= 0.0 {
        return Err(ClipError::Clip("raster is not north-up".to_string()));
    }

    let x_off = ((bbox.min_x - geo_transform[0]) / geo_transform[1]).floor() as isize;
    let x_end = ((bbox.max_x - geo_transform[0]) / geo_transform[1]).ceil() as isize;
    // top-left first: the Y window starts at max_y and runs down to min_y
    let y_off = ((bbox.max_y - geo_transform[3]) / geo_transform[5]).floor() as isize;
    let y_end = ((bbox.min_y - geo_transform[3]) / geo_transform[5]).ceil() as isize;

    let x_off = x_off.max(0);
    let y_off = y_off.max(0);
    let x_end = x_end.min(raster_width as isize);
    let y_end = y_end.min(raster_height as isize);

    if x_end <= x_off || y_end <= y_off {
        return Err(ClipError::Clip(
            "projection window does not intersect the raster".to_string(),
        ));
    }

    Ok(PixelWindow {
        x_off,
        y_off,
        width: (x_end - x_off) as usize,
        height: (y_end - y_off) as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 100x100 raster at 30 m: x 300000..303000, y 3997020..4000020
    const GT: [f64; 6] = [300_000.0, 30.0, 0.0, 4_000_020.0, 0.0, -30.0];

    #[test]
    fn window_inside_raster() {
        let bbox = BoundingBox {
            min_x: 300_069.0,
            min_y: 3_999_069.0,
            max_x: 300_231.0,
            max_y: 3_999_231.0,
        };
        let window = pixel_window(&GT, &bbox, 100, 100).unwrap();
        assert_eq!(window.x_off, 2);
        assert_eq!(window.y_off, 26);
        assert_eq!(window.width, 6);
        assert_eq!(window.height, 6);
    }

    #[test]
    fn window_origin_shift_matches_geotransform() {
        let bbox = BoundingBox {
            min_x: 300_069.0,
            min_y: 3_999_069.0,
            max_x: 300_231.0,
            max_y: 3_999_231.0,
        };
        let window = pixel_window(&GT, &bbox, 100, 100).unwrap();
        let origin_x = GT[0] + window.x_off as f64 * GT[1];
        let origin_y = GT[3] + window.y_off as f64 * GT[5];
        assert_eq!(origin_x, 300_060.0);
        assert_eq!(origin_y, 3_999_240.0);
    }

    #[test]
    fn window_is_clamped_to_raster() {
        let bbox = BoundingBox {
            min_x: 299_000.0,
            min_y: 3_996_000.0,
            max_x: 304_000.0,
            max_y: 4_001_000.0,
        };
        let window = pixel_window(&GT, &bbox, 100, 100).unwrap();
        assert_eq!(window.x_off, 0);
        assert_eq!(window.y_off, 0);
        assert_eq!(window.width, 100);
        assert_eq!(window.height, 100);
    }

    #[test]
    fn disjoint_window_is_an_error() {
        let bbox = BoundingBox {
            min_x: 400_000.0,
            min_y: 3_999_000.0,
            max_x: 401_000.0,
            max_y: 4_000_000.0,
        };
        assert!(matches!(
            pixel_window(&GT, &bbox, 100, 100),
            Err(ClipError::Clip(_))
        ));
    }

    #[test]
    fn rotated_raster_is_rejected() {
        let rotated = [300_000.0, 30.0, 0.1, 4_000_020.0, 0.0, -30.0];
        let bbox = BoundingBox {
            min_x: 300_000.0,
            min_y: 3_999_000.0,
            max_x: 300_300.0,
            max_y: 4_000_000.0,
        };
        assert!(matches!(
            pixel_window(&rotated, &bbox, 100, 100),
            Err(ClipError::Clip(_))
        ));
    }
}
