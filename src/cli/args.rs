use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "s2nir",
    version,
    about = "Combine bands 8, 4, and 3 from Sentinel 2 images to make a false-colour near-infrared image"
)]
pub struct CliArgs {
    /// Path to a directory containing one or more Sentinel 2 image sets
    pub workspace: PathBuf,

    /// Output in GeoTiff format (default is VRT)
    #[arg(short, long, default_value_t = false)]
    pub tiff: bool,

    /// Prevent overwriting existing files (default is to overwrite)
    #[arg(short = 'n', long = "no-overwrite", default_value_t = false)]
    pub no_overwrite: bool,

    /// JSON file with combination parameters (projections, compression, overview levels)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["s2nir", "/data"]).unwrap();
        assert_eq!(args.workspace, PathBuf::from("/data"));
        assert!(!args.tiff);
        assert!(!args.no_overwrite);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_short_and_long_flags() {
        let args = CliArgs::try_parse_from(["s2nir", "-t", "-n", "/data"]).unwrap();
        assert!(args.tiff && args.no_overwrite);

        let args =
            CliArgs::try_parse_from(["s2nir", "--tiff", "--no-overwrite", "/data"]).unwrap();
        assert!(args.tiff && args.no_overwrite);
    }

    #[test]
    fn test_workspace_is_required() {
        assert!(CliArgs::try_parse_from(["s2nir", "-t"]).is_err());
    }
}
