//! Filename decomposition and matching helpers

use crate::types::PathParts;

/// Split a path into directory, basename, stem and extension.
///
/// The directory split works on the last separator, Unix `/` or Windows `\`;
/// the extension split works on the last dot of the basename. A path without
/// a separator has an empty directory, a basename without a dot has an empty
/// extension and stem == basename.
pub fn split_path(path: &str) -> PathParts {
    let mut parts = PathParts::default();

    match path.rfind(['/', '\\']) {
        Some(pos) => {
            parts.directory = path[..pos].to_string();
            parts.basename = path[pos + 1..].to_string();
        }
        None => parts.basename = path.to_string(),
    }

    match parts.basename.rfind('.') {
        Some(pos) => {
            parts.stem = parts.basename[..pos].to_string();
            parts.extension = parts.basename[pos..].to_string();
        }
        None => parts.stem = parts.basename.clone(),
    }

    parts
}

/// True when `pattern` is empty or occurs literally inside `name`.
///
/// No glob or regex semantics; band filters are plain substrings.
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    pattern.is_empty() || name.contains(pattern)
}

/// Literal suffix comparison.
pub fn has_suffix(name: &str, suffix: &str) -> bool {
    name.ends_with(suffix)
}

/// Split a comma-separated list into its non-empty tokens, preserving order
/// and duplicates.
pub fn split_commas(input: &str) -> Vec<String> {
    input
        .split(',')
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_path_full() {
        let parts = split_path("/data/in/LC08_L2SP_021047_SR_B4.tif");
        assert_eq!(parts.directory, "/data/in");
        assert_eq!(parts.basename, "LC08_L2SP_021047_SR_B4.tif");
        assert_eq!(parts.stem, "LC08_L2SP_021047_SR_B4");
        assert_eq!(parts.extension, ".tif");
    }

    #[test]
    fn split_path_without_separator() {
        let parts = split_path("scene.tif");
        assert_eq!(parts.directory, "");
        assert_eq!(parts.basename, "scene.tif");
        assert_eq!(parts.stem, "scene");
        assert_eq!(parts.extension, ".tif");
    }

    #[test]
    fn split_path_without_extension() {
        let parts = split_path("dir/README");
        assert_eq!(parts.directory, "dir");
        assert_eq!(parts.basename, "README");
        assert_eq!(parts.stem, "README");
        assert_eq!(parts.extension, "");
    }

    #[test]
    fn split_path_windows_separator() {
        let parts = split_path("C:\\data\\scene.tif");
        assert_eq!(parts.directory, "C:\\data");
        assert_eq!(parts.basename, "scene.tif");
    }

    #[test]
    fn split_path_reassembles() {
        for path in ["/a/b/c.tif", "x/y.z.tif", "name.tif", "noext"] {
            let parts = split_path(path);
            assert_eq!(format!("{}{}", parts.stem, parts.extension), parts.basename);
            if !parts.directory.is_empty() {
                let rebuilt = format!("{}/{}{}", parts.directory, parts.stem, parts.extension);
                assert_eq!(split_path(&rebuilt).basename, parts.basename);
            }
        }
    }

    #[test]
    fn empty_pattern_matches_everything() {
        assert!(matches_pattern("anything.tif", ""));
    }

    #[test]
    fn pattern_is_literal_substring() {
        assert!(matches_pattern("LC08_QA_PIXEL.tif", "_QA_PIXEL"));
        assert!(!matches_pattern("LC08_QA_PIXEL.tif", "_NDVI"));
        // no glob semantics
        assert!(!matches_pattern("LC08_QA_PIXEL.tif", "QA*PIXEL"));
    }

    #[test]
    fn suffix_is_literal() {
        assert!(has_suffix("scene.tif", ".tif"));
        assert!(!has_suffix("scene.tiff", ".tif"));
        assert!(!has_suffix("tif", "scene.tif"));
    }

    #[test]
    fn split_commas_drops_empty_tokens() {
        assert_eq!(split_commas("QA_PIXEL,NDVI"), vec!["QA_PIXEL", "NDVI"]);
        assert_eq!(split_commas(",QA_PIXEL,,NDVI,"), vec!["QA_PIXEL", "NDVI"]);
        assert!(split_commas("").is_empty());
        assert!(split_commas(",,,").is_empty());
    }

    #[test]
    fn split_commas_keeps_order_and_duplicates() {
        assert_eq!(split_commas("B4,B3,B4"), vec!["B4", "B3", "B4"]);
    }
}
