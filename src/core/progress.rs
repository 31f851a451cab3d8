//! Reformatting of live `gdalwarp` output.
//!
//! GDAL prints each input file's progress as `Processing <file> [1/1] : 0...10...`
//! and several of these end up concatenated on one line. The formatter breaks
//! the line before every marker so each update renders on its own line.

/// Progress marker emitted by `gdalwarp` for a single input file
pub const WARP_PROGRESS_MARKER: &str = "[1/1]";

#[derive(Debug, Clone)]
pub struct ProgressFormatter {
    marker: String,
}

impl Default for ProgressFormatter {
    fn default() -> Self {
        Self::new(WARP_PROGRESS_MARKER)
    }
}

impl ProgressFormatter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn format_line(&self, line: &str) -> String {
        if self.marker.is_empty() || !line.contains(&self.marker) {
            return line.to_string();
        }
        line.replace(&self.marker, &format!("\n{}", self.marker))
    }
}
