//! Recursive discovery of Sentinel-2 image sets under a workspace directory.
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::image_set::{IMG_DATA_MARKER, ImageSet, NIR_SUFFIX};

/// Whether `path` is a band 8 tile inside an `IMG_DATA` directory
pub fn is_nir_tile(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(NIR_SUFFIX));
    let dir_matches = path
        .parent()
        .is_some_and(|dir| dir.to_string_lossy().contains(IMG_DATA_MARKER));
    name_matches && dir_matches
}

/// Paths of every band 8 tile under `workspace`, in walk order (sorted by name per directory)
pub fn find_nir_tiles(workspace: &Path) -> Vec<PathBuf> {
    let mut tiles = Vec::new();
    for entry in WalkDir::new(workspace).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        // Symlinked tiles count as files; symlinked directories are not entered
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        if is_nir_tile(entry.path()) {
            debug!("Found NIR tile: {:?}", entry.path());
            tiles.push(entry.into_path());
        }
    }
    tiles
}

/// Image sets for the given band 8 tiles; tiles whose paths cannot be passed
/// to the tools are skipped with a warning
pub fn image_sets_from_tiles(tiles: Vec<PathBuf>) -> Vec<ImageSet> {
    tiles
        .into_iter()
        .filter_map(|tile| match ImageSet::from_nir(&tile) {
            Ok(set) => Some(set),
            Err(e) => {
                warn!("Skipping {:?}: {}", tile, e);
                None
            }
        })
        .collect()
}

/// Image sets for every band 8 tile under `workspace`
pub fn discover_image_sets(workspace: &Path) -> Vec<ImageSet> {
    image_sets_from_tiles(find_nir_tiles(workspace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_finds_nir_tiles_only_under_img_data() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let granule_a = root.join("A.SAFE/GRANULE/L1C_A/IMG_DATA");
        let granule_b = root.join("B.SAFE/GRANULE/L2A_B/IMG_DATA/R10m");

        touch(&granule_a.join("T27WXN_20230101_B08.jp2"));
        touch(&granule_a.join("T27WXN_20230101_B04.jp2"));
        touch(&granule_a.join("T27WXN_20230101_B03.jp2"));
        touch(&granule_b.join("T27WWM_20230105_B08.jp2"));
        // Wrong directory
        touch(&root.join("A.SAFE/QI_DATA/T27WXN_20230101_B08.jp2"));
        // Wrong band
        touch(&granule_a.join("T27WXN_20230101_B8A.jp2"));

        let tiles = find_nir_tiles(root);

        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| is_nir_tile(t)));
        assert!(tiles[0].starts_with(root.join("A.SAFE")));
        assert!(tiles[1].starts_with(root.join("B.SAFE")));
    }

    #[test]
    fn test_marker_is_a_substring_of_the_directory_path() {
        assert!(is_nir_tile(Path::new("/x/IMG_DATA/R10m/T_B08.jp2")));
        assert!(is_nir_tile(Path::new("/x/IMG_DATA/T_B08.jp2")));
        assert!(!is_nir_tile(Path::new("/x/IMG_DATA_B08.jp2")));
        assert!(!is_nir_tile(Path::new("/x/img_data/T_B08.jp2")));
    }

    #[test]
    fn test_directory_named_like_a_tile_is_ignored() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("IMG_DATA/fake_B08.jp2")).unwrap();

        assert!(find_nir_tiles(dir.path()).is_empty());
    }

    #[test]
    fn test_discover_image_sets_counts_match() {
        let dir = tempdir().unwrap();
        let granule = dir.path().join("S.SAFE/GRANULE/G/IMG_DATA");
        for tile in ["T1_B08.jp2", "T2_B08.jp2", "T3_B08.jp2"] {
            touch(&granule.join(tile));
        }

        let sets = discover_image_sets(dir.path());

        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].name(), "T1_B08.jp2");
        assert_eq!(sets[2].geotiff, granule.join("T3_NIR_B843_ISN93.tif"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_tile_is_found() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("store/T1_B08.jp2");
        touch(&store);
        let granule = dir.path().join("S.SAFE/GRANULE/G/IMG_DATA");
        fs::create_dir_all(&granule).unwrap();
        std::os::unix::fs::symlink(&store, granule.join("T1_B08.jp2")).unwrap();

        let tiles = find_nir_tiles(dir.path());

        assert_eq!(tiles, vec![granule.join("T1_B08.jp2")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_entered() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real/IMG_DATA");
        touch(&real.join("T1_B08.jp2"));
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let tiles = find_nir_tiles(dir.path());

        assert_eq!(tiles, vec![real.join("T1_B08.jp2")]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_tiles_are_found_but_not_turned_into_sets() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        touch(&dir.path().join("IMG_DATA/T1_B08.jp2"));
        let odd = dir.path().join(OsStr::from_bytes(b"IMG_DATA_\xff"));
        touch(&odd.join("T2_B08.jp2"));

        let tiles = find_nir_tiles(dir.path());
        assert_eq!(tiles.len(), 2);
        assert_eq!(image_sets_from_tiles(tiles).len(), 1);
    }

    #[test]
    fn test_missing_workspace_yields_nothing() {
        let dir = tempdir().unwrap();
        assert!(discover_image_sets(&dir.path().join("nope")).is_empty());
    }
}
