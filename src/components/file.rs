use std::{fmt::Debug, path::Path};

use crate::{components::info::RasterInfo, errors::Result};

/// Source of [RasterInfo] for a single raster file.
pub trait File: Debug + Sized {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;
    fn path(&self) -> &Path;
    fn info(&self) -> Result<RasterInfo>;
}
