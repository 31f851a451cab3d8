//! I/O layer: external GDAL command-line tools (`tools`) and the GDAL library
//! adapters (`gdal`) used to verify written rasters.
pub mod gdal;
pub use self::gdal::{DatasetProbe, GdalProbe};

pub mod tools;
pub use tools::{SystemRunner, ToolInvocation, ToolRunner, ToolStatus};
