//! QA/QC helpers for geospatial raster datasets.
//!
//! The core compares the descriptive info of a raster file against a
//! reference file of the same dataset:
//!
//! ```no_run
//! let (info_equal, result) =
//!     raster_qaqc::compare_files("tas_2016.nc", "tas_2015.nc", Some("spatial_ref"))?;
//! if !info_equal {
//!     println!("{result}");
//! }
//! # Ok::<(), raster_qaqc::QaqcError>(())
//! ```

mod components;
pub mod config;
mod errors;
pub mod protocols;

pub use components::{
    backends, compare, compare_files, compare_info, comparison, info, CompareOptions,
    ComparisonResult, CrsMatchPolicy, FieldMatch, File, GdalFile, InfoField, JsonFile, RasterInfo,
};
pub use config::QaqcConfig;
pub use errors::{QaqcError, Result};
pub use protocols::{copy_templates, ProtocolTemplates};
