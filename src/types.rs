//! Shared types used across s2nir.
//! Includes `OutputKind`, which selects the artifact produced per image set.
use serde::{Deserialize, Serialize};

/// Artifact produced for every image set in a run
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Reprojected virtual raster (no pixel data written)
    #[default]
    Vrt,
    /// LZW-compressed GeoTIFF with overview pyramids
    GeoTiff,
}

impl OutputKind {
    pub fn from_tiff_flag(tiff: bool) -> Self {
        if tiff {
            OutputKind::GeoTiff
        } else {
            OutputKind::Vrt
        }
    }

    /// GDAL driver short name passed to `gdalwarp -of`
    pub fn gdal_driver(&self) -> &'static str {
        match self {
            OutputKind::Vrt => "VRT",
            OutputKind::GeoTiff => "GTiff",
        }
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputKind::Vrt => write!(f, "VRT"),
            OutputKind::GeoTiff => write!(f, "GeoTIFF"),
        }
    }
}
