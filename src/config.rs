use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::{
    components::comparison::{CompareOptions, CrsMatchPolicy},
    errors::{QaqcError, Result},
    protocols::ProtocolTemplates,
};

pub const CRS_VARIABLE_VAR: &str = "QAQC_CRS_VARIABLE";
pub const STRICT_CRS_MATCH_VAR: &str = "QAQC_STRICT_CRS_MATCH";
pub const TEMPLATE_DIR_VAR: &str = "QAQC_TEMPLATE_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaqcConfig {
    pub crs_variable: Option<String>,
    pub strict_crs_match: CrsMatchPolicy,
    pub template_dir: Option<PathBuf>,
}

impl QaqcConfig {
    /// Read `QAQC_*` environment variables. Unset variables keep defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value: &String| !value.is_empty());
        Ok(Self {
            crs_variable: non_empty(CRS_VARIABLE_VAR),
            strict_crs_match: non_empty(STRICT_CRS_MATCH_VAR)
                .map(|policy| policy.parse())
                .transpose()?
                .unwrap_or_default(),
            template_dir: non_empty(TEMPLATE_DIR_VAR).map(PathBuf::from),
        })
    }

    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            crs_variable: self.crs_variable.clone(),
            strict_crs_match: self.strict_crs_match,
        }
    }

    pub fn templates(&self) -> Result<ProtocolTemplates> {
        self.template_dir
            .as_ref()
            .map(ProtocolTemplates::new)
            .ok_or(QaqcError::TemplateDirUnset)
    }
}
