//! Core building blocks: combination parameters, image-set naming, workspace
//! discovery, tool argument lists, and progress reformatting. These are
//! internal primitives consumed by the high-level `api` module.
pub mod commands;
pub mod discovery;
pub mod image_set;
pub mod params;
pub mod progress;
