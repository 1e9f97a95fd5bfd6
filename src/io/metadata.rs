//! Landsat MTL metadata lookup and parsing

use crate::types::{ClipError, ClipResult, SceneMetadata};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Length of the Landsat Collection-2 product identifier, e.g.
/// `LC08_L2SP_021047_20250923_20251001_02_T1`. Band filenames start with it.
const PRODUCT_ID_LEN: usize = 40;

const MTL_SUFFIX: &str = "_MTL.txt";

/// Reader for the per-scene `*_MTL.txt` metadata file
pub struct MtlReader;

impl MtlReader {
    /// Locate the metadata file next to a band file.
    ///
    /// The scene's metadata file shares the 40-character product id prefix of
    /// every band filename, e.g.
    /// `LC08_L2SP_021047_20250923_20251001_02_T1_MTL.txt`. A filename shorter
    /// than the prefix is used whole. Returns the path only when the file
    /// exists.
    pub fn locate_metadata_file(dir: &Path, tif_filename: &str) -> Option<PathBuf> {
        let product_id: String = tif_filename.chars().take(PRODUCT_ID_LEN).collect();
        let path = dir.join(format!("{}{}", product_id, MTL_SUFFIX));
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Extract the map projection name and UTM zone from an MTL file.
    ///
    /// The file is scanned line by line; a line containing `MAP_PROJECTION`
    /// contributes the value after its first `=` (quotes stripped), a line
    /// containing `UTM_ZONE` contributes the integer after its first `=`.
    /// Scanning stops as soon as both fields are set. A non-numeric UTM zone
    /// is a fatal metadata error, not a missing value.
    pub fn extract_projection_info(path: &Path) -> ClipResult<SceneMetadata> {
        log::debug!("reading metadata file {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut metadata = SceneMetadata::default();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.contains("MAP_PROJECTION") {
                if let Some((_, value)) = line.split_once('=') {
                    metadata.projection_name = strip_value(value);
                }
            }

            if line.contains("UTM_ZONE") {
                if let Some((_, value)) = line.split_once('=') {
                    metadata.utm_zone = value.trim().parse::<i32>().map_err(|_| {
                        ClipError::Metadata(format!(
                            "malformed UTM_ZONE {:?} in {}",
                            value.trim(),
                            path.display()
                        ))
                    })?;
                }
            }

            if metadata.is_complete() {
                break;
            }
        }

        Ok(metadata)
    }
}

/// Trim whitespace and one pair of surrounding double quotes.
fn strip_value(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}
