use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::OutputKind;

/// UTM zone 27N, the native grid of the Sentinel-2 tiles this tool targets
pub const DEFAULT_SOURCE_SRS: &str = "EPSG:32627";
/// ISN93 / Lambert 1993
pub const DEFAULT_TARGET_SRS: &str = "EPSG:3057";
pub const DEFAULT_COMPRESSION: &str = "LZW";
pub const DEFAULT_OVERVIEW_LEVELS: [u32; 8] = [2, 4, 8, 16, 32, 64, 128, 256];

/// Band-combination parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineParams {
    pub output: OutputKind,
    /// Delete and rebuild existing outputs; when false those image sets are skipped
    pub overwrite: bool,
    pub source_srs: String,
    pub target_srs: String,
    /// Codec for both the GeoTIFF and its overviews
    pub compression: String,
    pub overview_levels: Vec<u32>,
}

impl Default for CombineParams {
    fn default() -> Self {
        Self {
            output: OutputKind::Vrt,
            overwrite: true,
            source_srs: DEFAULT_SOURCE_SRS.to_string(),
            target_srs: DEFAULT_TARGET_SRS.to_string(),
            compression: DEFAULT_COMPRESSION.to_string(),
            overview_levels: DEFAULT_OVERVIEW_LEVELS.to_vec(),
        }
    }
}

impl CombineParams {
    pub fn new(tiff: bool, overwrite: bool) -> Self {
        Self {
            output: OutputKind::from_tiff_flag(tiff),
            overwrite,
            ..Self::default()
        }
    }

    /// Load parameters from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_fixed_toolchain_settings() {
        let params = CombineParams::default();
        assert_eq!(params.output, OutputKind::Vrt);
        assert!(params.overwrite);
        assert_eq!(params.source_srs, "EPSG:32627");
        assert_eq!(params.target_srs, "EPSG:3057");
        assert_eq!(params.compression, "LZW");
        assert_eq!(params.overview_levels, vec![2, 4, 8, 16, 32, 64, 128, 256]);
    }

    #[test]
    fn test_new_from_flags() {
        let params = CombineParams::new(true, false);
        assert_eq!(params.output, OutputKind::GeoTiff);
        assert!(!params.overwrite);
    }

    #[test]
    fn test_from_json_file_partial() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("params.json");
        let mut file = File::create(&file_path).unwrap();

        let config_data = r#"
    {
        "output": "geotiff",
        "target_srs": "EPSG:4326"
    }
    "#;

        file.write_all(config_data.as_bytes()).unwrap();

        let params = CombineParams::from_json_file(&file_path).unwrap();

        assert_eq!(params.output, OutputKind::GeoTiff);
        assert_eq!(params.target_srs, "EPSG:4326");
        assert_eq!(params.source_srs, DEFAULT_SOURCE_SRS);
        assert!(params.overwrite);
    }

    #[test]
    fn test_from_json_file_rejects_garbage() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("params.json");
        std::fs::write(&file_path, "not json").unwrap();

        assert!(CombineParams::from_json_file(&file_path).is_err());
    }
}
