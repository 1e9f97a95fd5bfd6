//! EPSG code handling and per-run CRS resolution

use crate::types::SceneMetadata;

const EPSG_PREFIX: &str = "EPSG:";

/// Build an EPSG string from a UTM zone.
///
/// Northern hemisphere zones map to 32600+zone, southern to 32700+zone.
/// Zones outside [1, 60] yield an empty string.
pub fn epsg_from_utm_zone(zone: i32, southern: bool) -> String {
    if !(1..=60).contains(&zone) {
        return String::new();
    }
    let code = if southern { 32700 + zone } else { 32600 + zone };
    format!("{}{}", EPSG_PREFIX, code)
}

/// Parse the integer code out of an "EPSG:<int>" string.
///
/// Returns -1 when the prefix is missing or the remainder is not a
/// non-negative decimal integer.
pub fn parse_epsg(crs: &str) -> i32 {
    match crs.strip_prefix(EPSG_PREFIX) {
        Some(rest) => rest.parse::<i32>().unwrap_or(-1),
        None => -1,
    }
}

/// Running CRS state for one clipping run.
///
/// A zone read from one scene's metadata replaces the running CRS for every
/// later file, including files without their own metadata. Scenes in one
/// input directory are expected to share a UTM zone.
#[derive(Debug, Clone)]
pub struct CrsResolver {
    current: String,
}

impl CrsResolver {
    /// Seed the resolver with the user-supplied default CRS.
    pub fn new(default_crs: &str) -> Self {
        Self {
            current: default_crs.to_string(),
        }
    }

    /// The CRS in effect for the next clip operation.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Fold one scene's metadata into the running CRS.
    ///
    /// A valid zone-derived EPSG string that differs from the running value
    /// replaces it for the rest of the run. All Landsat scenes are assumed
    /// northern hemisphere.
    pub fn apply(&mut self, metadata: &SceneMetadata) {
        let derived = epsg_from_utm_zone(metadata.utm_zone, false);
        if !derived.is_empty() && derived != self.current {
            log::info!("updating CRS {} with {}", self.current, derived);
            self.current = derived;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utm_zone_to_epsg_north_and_south() {
        assert_eq!(epsg_from_utm_zone(15, false), "EPSG:32615");
        assert_eq!(epsg_from_utm_zone(15, true), "EPSG:32715");
        assert_eq!(epsg_from_utm_zone(1, false), "EPSG:32601");
        assert_eq!(epsg_from_utm_zone(60, false), "EPSG:32660");
        assert_eq!(epsg_from_utm_zone(60, true), "EPSG:32760");
    }

    #[test]
    fn utm_zone_out_of_range_is_empty() {
        assert_eq!(epsg_from_utm_zone(0, false), "");
        assert_eq!(epsg_from_utm_zone(61, false), "");
        assert_eq!(epsg_from_utm_zone(-3, true), "");
    }

    #[test]
    fn parse_epsg_round_trips() {
        assert_eq!(parse_epsg("EPSG:32615"), 32615);
        assert_eq!(parse_epsg("EPSG:4326"), 4326);
        assert_eq!(parse_epsg("EPSG:0"), 0);
    }

    #[test]
    fn parse_epsg_rejects_bad_input() {
        assert_eq!(parse_epsg("32615"), -1);
        assert_eq!(parse_epsg("epsg:32615"), -1);
        assert_eq!(parse_epsg("EPSG:abc"), -1);
        assert_eq!(parse_epsg("EPSG:"), -1);
        assert_eq!(parse_epsg(""), -1);
    }

    #[test]
    fn override_sticks_for_later_files() {
        let mut resolver = CrsResolver::new("EPSG:32610");

        // file A: no metadata
        assert_eq!(resolver.current(), "EPSG:32610");

        // file B: metadata says zone 15
        resolver.apply(&SceneMetadata {
            projection_name: "UTM".to_string(),
            utm_zone: 15,
        });
        assert_eq!(resolver.current(), "EPSG:32615");

        // file C: no metadata again, inherits B's zone, not the default
        assert_eq!(resolver.current(), "EPSG:32615");
    }

    #[test]
    fn invalid_zone_keeps_running_crs() {
        let mut resolver = CrsResolver::new("EPSG:32610");
        resolver.apply(&SceneMetadata {
            projection_name: "UTM".to_string(),
            utm_zone: 99,
        });
        assert_eq!(resolver.current(), "EPSG:32610");
    }

    #[test]
    fn matching_zone_is_a_no_op() {
        let mut resolver = CrsResolver::new("EPSG:32615");
        resolver.apply(&SceneMetadata {
            projection_name: "UTM".to_string(),
            utm_zone: 15,
        });
        assert_eq!(resolver.current(), "EPSG:32615");
    }
}
