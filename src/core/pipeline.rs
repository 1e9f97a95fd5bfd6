//! Directory-scanning clip pipeline

use crate::core::crs::{parse_epsg, CrsResolver};
use crate::core::paths::{matches_pattern, split_path};
use crate::io::metadata::MtlReader;
use crate::io::mask::VectorExtentReader;
use crate::io::raster::RasterClipEngine;
use crate::types::{ClipError, ClipRequest, ClipResult};
use std::path::Path;

/// Fixed inflation margin in metres applied to the mask extent.
pub const EXTENT_MARGIN: f64 = 31.0;

/// Batch clipping of Landsat band files to a mask extent.
///
/// The pipeline walks the input directory once per requested dataset,
/// resolving the CRS per file from scene metadata and handing each matching
/// band file to the clip engine. The first hard error aborts the whole run;
/// already-written outputs are left in place.
pub struct ClipPipeline<V, R> {
    mask_reader: V,
    clip_engine: R,
}

impl<V: VectorExtentReader, R: RasterClipEngine> ClipPipeline<V, R> {
    pub fn new(mask_reader: V, clip_engine: R) -> Self {
        Self {
            mask_reader,
            clip_engine,
        }
    }

    pub fn run(&self, request: &ClipRequest) -> ClipResult<()> {
        if !request.input_dir.is_dir() {
            return Err(ClipError::Path(format!(
                "input directory not found: {}",
                request.input_dir.display()
            )));
        }
        if !request.output_dir.is_dir() {
            return Err(ClipError::Path(format!(
                "output directory not found: {}",
                request.output_dir.display()
            )));
        }
        if request.default_crs.is_empty() {
            return Err(ClipError::Argument("source CRS is required".to_string()));
        }
        if request.mask_path.as_os_str().is_empty() {
            return Err(ClipError::Argument("mask file is required".to_string()));
        }
        if request.datasets.is_empty() {
            return Err(ClipError::Argument("no datasets provided".to_string()));
        }

        let envelope = self
            .mask_reader
            .read_first_feature_envelope(&request.mask_path)?;
        let bbox = envelope.inflate(EXTENT_MARGIN);
        log::info!(
            "clip extent: min_x={:.15}, min_y={:.15}, max_x={:.15}, max_y={:.15}",
            bbox.min_x,
            bbox.min_y,
            bbox.max_x,
            bbox.max_y
        );

        let files = list_filenames(&request.input_dir)?;
        let pattern = request.pattern.as_deref().unwrap_or("");
        let label = request.label.as_deref().unwrap_or("");

        let mut crs = CrsResolver::new(&request.default_crs);

        for dataset in &request.datasets {
            log::info!("====== processing {} ======", dataset);
            let band_tag = format!("_{}", dataset);

            for filename in &files {
                if !matches_pattern(filename, pattern) {
                    continue;
                }
                if !matches_pattern(filename, &band_tag) {
                    continue;
                }

                let parts = split_path(filename);
                log::debug!(
                    "input {}: directory={:?}, basename={:?}, stem={:?}, extension={:?}",
                    filename,
                    parts.directory,
                    parts.basename,
                    parts.stem,
                    parts.extension
                );
                if parts.extension != ".tif" {
                    log::info!("skipping {}: \".tif\" extension expected", filename);
                    continue;
                }

                match MtlReader::locate_metadata_file(&request.input_dir, filename) {
                    Some(mtl_path) => match MtlReader::extract_projection_info(&mtl_path) {
                        Ok(metadata) if metadata.is_complete() => {
                            log::info!(
                                "metadata {}: projection={}, zone={}",
                                mtl_path.display(),
                                metadata.projection_name,
                                metadata.utm_zone
                            );
                            crs.apply(&metadata);
                        }
                        Ok(_) => log::warn!(
                            "metadata {} incomplete, using CRS {}",
                            mtl_path.display(),
                            crs.current()
                        ),
                        Err(err @ ClipError::Metadata(_)) => return Err(err),
                        Err(err) => log::warn!(
                            "metadata {} unreadable ({}), using CRS {}",
                            mtl_path.display(),
                            err,
                            crs.current()
                        ),
                    },
                    None => log::warn!(
                        "metadata not found for {}, using CRS {}",
                        filename,
                        crs.current()
                    ),
                }

                let epsg = parse_epsg(crs.current());
                if epsg == -1 {
                    return Err(ClipError::Crs(format!(
                        "cannot parse EPSG code from {:?}",
                        crs.current()
                    )));
                }

                let in_file = request
                    .input_dir
                    .join(format!("{}{}", parts.stem, parts.extension));
                let out_file = request
                    .output_dir
                    .join(format!("{}{}{}", parts.stem, label, parts.extension));
                log::info!(
                    "clipping {} -> {} (EPSG:{})",
                    in_file.display(),
                    out_file.display(),
                    epsg
                );

                self.clip_engine.clip(&in_file, &out_file, &bbox, epsg)?;
            }
        }

        log::info!("clipping complete");
        Ok(())
    }
}

/// All entry names of the input directory, lexicographically sorted for a
/// reproducible processing order.
fn list_filenames(dir: &Path) -> ClipResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
