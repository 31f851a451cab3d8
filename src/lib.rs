#![doc = r#"
s2nir — false-colour near-infrared composites from Sentinel-2 tiles.

This crate finds Sentinel-2 image sets (band 8 tiles under an `IMG_DATA`
directory) in a workspace and combines bands 8, 4 and 3 into a three-band
composite, reprojected from UTM zone 27N (EPSG:32627) to ISN93 (EPSG:3057).
The output is either a virtual raster or an LZW-compressed GeoTIFF with
overview pyramids. It powers the `s2nir` CLI and can be embedded in your own
Rust applications.

All raster work is delegated to GDAL: `gdalbuildvrt`, `gdalwarp` and
`gdaladdo` must be on `PATH`, and the GDAL library is used to verify written
GeoTIFFs before their pyramids are built.

Requirements
------------
- GDAL command-line utilities, development headers and runtime.
- Rust 2024 edition toolchain.

Quick start
-----------
```rust,no_run
use std::path::Path;
use s2nir::{combine_bands, CombineParams};

fn main() -> s2nir::Result<()> {
    s2nir::io::gdal::init();

    // GeoTIFF output, keep anything already built
    let params = CombineParams::new(true, false);
    let report = combine_bands(Path::new("/data/sentinel2"), &params)?;

    println!(
        "found={} completed={} skipped={}",
        report.found,
        report.completed.len(),
        report.skipped.len()
    );
    Ok(())
}
```

Output names
------------
For a tile `T27WXN_20230101T000000_B08.jp2` the composite files are written
next to it as `..._NIR_B843.vrt` (intermediate), `..._NIR_B843_ISN93.vrt` and
`..._NIR_B843_ISN93.tif`.

Custom tool runners
-------------------
[`combine_bands_with`] takes any [`ToolRunner`] and [`DatasetProbe`], which
makes it possible to log, sandbox or fake the GDAL toolchain.

Error handling
--------------
All public functions return `s2nir::Result<T>`. A required tool exiting with a
non-zero status stops the run with [`Error::ToolFailed`]; a GeoTIFF that cannot
be reopened for pyramids is only recorded in [`CombineReport::pyramid_failures`].

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — naming, discovery, tool arguments, progress formatting.
- [`io`] — tool execution and GDAL adapters.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::image_set::ImageSet;
pub use crate::core::params::CombineParams;
pub use crate::core::progress::ProgressFormatter;
pub use error::{Error, Result};
pub use types::OutputKind;

pub use crate::io::gdal::{DatasetProbe, GdalProbe};
pub use crate::io::tools::{SystemRunner, ToolInvocation, ToolRunner, ToolStatus};

pub use crate::api::{
    CombineReport, SetOutcome, combine_bands, combine_bands_with, process_image_set,
};
