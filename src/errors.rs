use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, QaqcError>;

#[derive(thiserror::Error, Debug)]
pub enum QaqcError {
    #[error("files must share the same suffix: {check:?} vs reference {reference:?}")]
    SuffixMismatch { check: PathBuf, reference: PathBuf },
    #[error(transparent)]
    GdalError(#[from] gdal::errors::GdalError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error("protocol template {0:?} does not exist")]
    MissingTemplate(PathBuf),
    #[error("no template directory configured")]
    TemplateDirUnset,
    #[error("unknown crs match policy {0:?}, expected one of all, any, non-empty")]
    InvalidPolicy(String),
}
