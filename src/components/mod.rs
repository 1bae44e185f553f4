pub mod backends;
pub mod comparison;
pub mod file;
pub mod info;

pub use backends::{gdal_backend::GdalFile, json_backend::JsonFile};
pub use comparison::{
    compare, compare_files, compare_info, CompareOptions, ComparisonResult, CrsMatchPolicy,
    FieldMatch,
};
pub use file::File;
pub use info::{InfoField, RasterInfo};
