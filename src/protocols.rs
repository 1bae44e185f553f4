use log::info;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::{QaqcError, Result};

/// Notebook templates of the QA/QC and metadata collection protocols.
pub const TEMPLATE_NAMES: [&str; 2] = ["qaqc.ipynb", "metadata.ipynb"];

/// Copy the protocol notebooks from `source_dir` into `dest_dir`.
///
/// Existing files in `dest_dir` are overwritten. Returns the written paths.
pub fn copy_templates(
    source_dir: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let (source_dir, dest_dir) = (source_dir.as_ref(), dest_dir.as_ref());
    TEMPLATE_NAMES
        .iter()
        .map(|name| {
            let source = source_dir.join(name);
            if !source.is_file() {
                return Err(QaqcError::MissingTemplate(source));
            }
            let dest = dest_dir.join(name);
            fs::copy(&source, &dest)?;
            info!("copied {} to {}", source.display(), dest.display());
            Ok(dest)
        })
        .collect()
}

/// Protocol templates installed in a known directory.
#[derive(Debug, Clone)]
pub struct ProtocolTemplates {
    source_dir: PathBuf,
}

impl ProtocolTemplates {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn copy_to(&self, dest_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        copy_templates(&self.source_dir, dest_dir)
    }

    pub fn copy_to_current_dir(&self) -> Result<Vec<PathBuf>> {
        self.copy_to(std::env::current_dir()?)
    }
}
