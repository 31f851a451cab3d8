use std::fs;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use s2nir::{CombineParams, OutputKind, combine_bands};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Parameters from `--config` (or defaults) with the command-line flags applied on top
fn resolve_params(args: &CliArgs) -> Result<CombineParams, AppError> {
    let mut params = match &args.config {
        Some(path) => CombineParams::from_json_file(path).map_err(|source| AppError::Config {
            path: path.clone(),
            source,
        })?,
        None => CombineParams::default(),
    };
    if args.tiff {
        params.output = OutputKind::GeoTiff;
    }
    if args.no_overwrite {
        params.overwrite = false;
    }
    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.verbose);
    s2nir::io::gdal::init();

    if !args.workspace.is_dir() {
        return Err(AppError::WorkspaceNotFound {
            path: args.workspace,
        }
        .into());
    }

    let params = resolve_params(&args)?;
    info!(
        "Workspace: {:?} (output: {}, overwrite: {})",
        args.workspace, params.output, params.overwrite
    );

    let report = combine_bands(&args.workspace, &params)?;

    info!("Band combination complete!");
    info!("Found: {}", report.found);
    info!("Completed: {}", report.completed.len());
    info!("Skipped: {}", report.skipped.len());
    if !report.pyramid_failures.is_empty() {
        warn!("Without pyramids: {}", report.pyramid_failures.len());
    }

    if let Some(path) = &args.report {
        fs::write(path, report.to_json()?).map_err(AppError::from)?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}
