use std::path::Path;
use std::sync::Once;

use gdal::errors::CplErrType;
use gdal::{Dataset, DatasetOptions, GdalOpenFlags};
use tracing::{debug, error, warn};

use crate::error::Result;

static INIT: Once = Once::new();

/// One-time GDAL process configuration.
///
/// Routes GDAL's own diagnostics into `tracing` instead of letting the library
/// print them to stderr. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        gdal::config::set_error_handler(|class, code, msg| match class {
            CplErrType::None => {}
            CplErrType::Debug => debug!("GDAL [{}]: {}", code, msg),
            CplErrType::Warning => warn!("GDAL [{}]: {}", code, msg),
            CplErrType::Failure | CplErrType::Fatal => error!("GDAL [{}]: {}", code, msg),
        });
    });
}

/// Checks that a written raster can be reopened for update before its
/// overviews are built
pub trait DatasetProbe {
    fn open_for_update(&self, path: &Path) -> Result<()>;
}

/// Probe backed by the GDAL library
#[derive(Debug, Default, Clone, Copy)]
pub struct GdalProbe;

impl DatasetProbe for GdalProbe {
    fn open_for_update(&self, path: &Path) -> Result<()> {
        let options = DatasetOptions {
            open_flags: GdalOpenFlags::GDAL_OF_UPDATE | GdalOpenFlags::GDAL_OF_RASTER,
            ..DatasetOptions::default()
        };
        let dataset = Dataset::open_ex(path, options)?;
        let (size_x, size_y) = dataset.raster_size();
        debug!(
            "Opened {:?} for update: {}x{}, {} bands",
            path,
            size_x,
            size_y,
            dataset.raster_count()
        );
        // Closed before gdaladdo touches the file
        drop(dataset);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_probe_fails_for_missing_file() {
        init();
        let dir = tempdir().unwrap();
        let result = GdalProbe.open_for_update(&dir.path().join("missing.tif"));
        assert!(matches!(result, Err(Error::Gdal(_))));
    }

    #[test]
    fn test_probe_fails_for_non_raster() {
        init();
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.tif");
        std::fs::write(&path, b"this is not a tiff").unwrap();
        assert!(GdalProbe.open_for_update(&path).is_err());
    }
}
