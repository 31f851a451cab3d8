//! Sentinel-2 image sets and the file names derived from their band 8 tile.
//!
//! Every derived file sits next to the near-infrared tile and differs from it
//! only in the trailing band/format token, so downstream consumers can rely on
//! these names.
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::OutputKind;

pub const NIR_SUFFIX: &str = "B08.jp2";
pub const RED_SUFFIX: &str = "B04.jp2";
pub const GREEN_SUFFIX: &str = "B03.jp2";
pub const COMPOSITE_SUFFIX: &str = "NIR_B843.vrt";
pub const REPROJECTED_VRT_SUFFIX: &str = "NIR_B843_ISN93.vrt";
pub const GEOTIFF_SUFFIX: &str = "NIR_B843_ISN93.tif";

/// Directory marker of the granule image folder in a SAFE product
pub const IMG_DATA_MARKER: &str = "IMG_DATA";

/// One NIR/red/green tile triple plus its derived output paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    pub nir: PathBuf,
    pub red: PathBuf,
    pub green: PathBuf,
    /// Intermediate three-band virtual raster
    pub composite_vrt: PathBuf,
    pub reprojected_vrt: PathBuf,
    pub geotiff: PathBuf,
}

impl ImageSet {
    /// Derive the image set from the path of a `*B08.jp2` tile
    pub fn from_nir<P: AsRef<Path>>(nir: P) -> Result<Self> {
        let nir = nir.as_ref();
        let invalid = || Error::InvalidImageSet {
            path: nir.to_path_buf(),
        };

        let prefix = nir
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(NIR_SUFFIX))
            .ok_or_else(invalid)?;
        // Tool arguments are passed as text
        if nir.to_str().is_none() {
            return Err(invalid());
        }
        let dir = nir.parent().unwrap_or_else(|| Path::new(""));
        let sibling = |suffix: &str| dir.join(format!("{}{}", prefix, suffix));

        Ok(ImageSet {
            nir: nir.to_path_buf(),
            red: sibling(RED_SUFFIX),
            green: sibling(GREEN_SUFFIX),
            composite_vrt: sibling(COMPOSITE_SUFFIX),
            reprojected_vrt: sibling(REPROJECTED_VRT_SUFFIX),
            geotiff: sibling(GEOTIFF_SUFFIX),
        })
    }

    /// Band inputs in composite order: NIR, red, green
    pub fn bands(&self) -> [&Path; 3] {
        [&self.nir, &self.red, &self.green]
    }

    /// Final artifact for the requested output kind
    pub fn target(&self, output: OutputKind) -> &Path {
        match output {
            OutputKind::Vrt => &self.reprojected_vrt,
            OutputKind::GeoTiff => &self.geotiff,
        }
    }

    pub fn name(&self) -> String {
        file_name_of(&self.nir)
    }
}

/// Final path component as text, falling back to the whole path
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
