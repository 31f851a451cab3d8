//! High-level library API: discover every Sentinel-2 image set in a workspace
//! and turn each into a reprojected NIR/red/green composite. Prefer these
//! entrypoints over the low-level `core` modules when integrating s2nir.
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::commands;
use crate::core::discovery::{find_nir_tiles, image_sets_from_tiles};
use crate::core::image_set::{ImageSet, file_name_of};
use crate::core::params::CombineParams;
use crate::core::progress::ProgressFormatter;
use crate::error::Result;
use crate::io::gdal::{DatasetProbe, GdalProbe};
use crate::io::tools::{SystemRunner, ToolRunner};
use crate::types::OutputKind;

/// What happened to a single image set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOutcome {
    Completed,
    /// Output written, but the GeoTIFF could not be reopened for pyramids
    CompletedWithoutPyramids,
    /// Output already existed and overwriting was disabled
    Skipped,
}

/// Summary of a band-combination run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombineReport {
    pub found: usize,
    /// Final artifacts written in this run
    pub completed: Vec<PathBuf>,
    /// Existing artifacts left untouched
    pub skipped: Vec<PathBuf>,
    /// GeoTIFFs written without overview pyramids
    pub pyramid_failures: Vec<PathBuf>,
}

impl CombineReport {
    fn record(&mut self, set: &ImageSet, output: OutputKind, outcome: SetOutcome) {
        let target = set.target(output).to_path_buf();
        match outcome {
            SetOutcome::Completed => self.completed.push(target),
            SetOutcome::CompletedWithoutPyramids => {
                self.pyramid_failures.push(target.clone());
                self.completed.push(target);
            }
            SetOutcome::Skipped => self.skipped.push(target),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Combine bands 8, 4 and 3 for every image set under `workspace` using the
/// installed GDAL tools, streaming their progress to stdout.
///
/// Call [`crate::io::gdal::init`] once at process start before this.
pub fn combine_bands(workspace: &Path, params: &CombineParams) -> Result<CombineReport> {
    let mut stdout = std::io::stdout();
    combine_bands_with(workspace, params, &mut SystemRunner, &GdalProbe, &mut stdout)
}

/// [`combine_bands`] with injected tool runner, dataset probe and progress sink.
///
/// A required tool failing aborts the run with an error; a GeoTIFF that cannot
/// be reopened for pyramids is reported and the run continues.
pub fn combine_bands_with<R, P, W>(
    workspace: &Path,
    params: &CombineParams,
    runner: &mut R,
    probe: &P,
    progress: &mut W,
) -> Result<CombineReport>
where
    R: ToolRunner + ?Sized,
    P: DatasetProbe + ?Sized,
    W: Write + ?Sized,
{
    let tiles = find_nir_tiles(workspace);
    let found = tiles.len();
    info!("Images found: {}", found);
    let sets = image_sets_from_tiles(tiles);

    let mut report = CombineReport {
        found,
        ..CombineReport::default()
    };

    for set in &sets {
        let outcome = process_image_set(set, params, runner, probe, progress)?;
        report.record(set, params.output, outcome);
    }

    Ok(report)
}

/// Run the build-vrt → warp → (pyramids) sequence for one image set
pub fn process_image_set<R, P, W>(
    set: &ImageSet,
    params: &CombineParams,
    runner: &mut R,
    probe: &P,
    progress: &mut W,
) -> Result<SetOutcome>
where
    R: ToolRunner + ?Sized,
    P: DatasetProbe + ?Sized,
    W: Write + ?Sized,
{
    info!("Started on {}", set.name());

    let target = set.target(params.output);
    let target_name = file_name_of(target);
    if target.exists() {
        if !params.overwrite {
            info!("{} already exists - stopping", target_name);
            return Ok(SetOutcome::Skipped);
        }
        info!("{} already exists - deleting it", target_name);
        std::fs::remove_file(target)?;
    }

    let tiff = params.output == OutputKind::GeoTiff;

    info!(
        "Building {}virtual raster",
        if tiff { "intermediate " } else { "" }
    );
    let build = commands::build_vrt(set);
    runner.run(&build)?.check(&build)?;

    if tiff {
        info!("Reprojecting and saving geotiff");
    } else {
        info!("Reprojecting virtual raster");
    }
    let warp = commands::warp(set, params);
    let formatter = ProgressFormatter::default();
    let status = runner.run_streaming(&warp, &mut |line| {
        writeln!(progress, "{}", formatter.format_line(line))?;
        progress.flush()?;
        Ok(())
    })?;
    status.check(&warp)?;

    let mut outcome = SetOutcome::Completed;
    if tiff {
        match probe.open_for_update(target) {
            Ok(()) => {
                info!("Building pyramids for geotiff");
                let addo = commands::add_overviews(target, params);
                runner.run(&addo)?.check(&addo)?;
                info!("Pyramids built for {}", target.display());
            }
            Err(e) => {
                warn!(
                    "Failed to open {} for pyramid building: {}",
                    target.display(),
                    e
                );
                outcome = SetOutcome::CompletedWithoutPyramids;
            }
        }
    }

    info!("Completed processing of {}", target_name);
    Ok(outcome)
}
