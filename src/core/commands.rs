//! Argument lists for the GDAL utilities driven by the band combiner.
use std::path::Path;

use crate::core::image_set::ImageSet;
use crate::core::params::CombineParams;
use crate::io::tools::ToolInvocation;
use crate::types::OutputKind;

pub const GDALBUILDVRT: &str = "gdalbuildvrt";
pub const GDALWARP: &str = "gdalwarp";
pub const GDALADDO: &str = "gdaladdo";

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// `gdalbuildvrt -separate <composite> <B08> <B04> <B03>`
pub fn build_vrt(set: &ImageSet) -> ToolInvocation {
    ToolInvocation::new(GDALBUILDVRT)
        .arg("-separate")
        .arg(path_arg(&set.composite_vrt))
        .args(set.bands().iter().map(|band| path_arg(band)))
}

/// Reproject the composite into the output kind's target file
pub fn warp(set: &ImageSet, params: &CombineParams) -> ToolInvocation {
    let mut inv = ToolInvocation::new(GDALWARP).args(["-of", params.output.gdal_driver()]);
    if params.output == OutputKind::GeoTiff {
        inv = inv.arg("-co").arg(format!("COMPRESS={}", params.compression));
    }
    inv.arg("-s_srs")
        .arg(params.source_srs.as_str())
        .arg("-t_srs")
        .arg(params.target_srs.as_str())
        .args(["-wo", "NUM_THREADS=ALL_CPUS", "-multi"])
        .arg(path_arg(&set.composite_vrt))
        .arg(path_arg(set.target(params.output)))
}

/// Read-only (external `.ovr`) overview pyramids for a GeoTIFF
pub fn add_overviews(geotiff: &Path, params: &CombineParams) -> ToolInvocation {
    ToolInvocation::new(GDALADDO)
        .args(["-ro", "--config", "COMPRESS_OVERVIEW"])
        .arg(params.compression.as_str())
        .arg(path_arg(geotiff))
        .args(params.overview_levels.iter().map(|level| level.to_string()))
}
