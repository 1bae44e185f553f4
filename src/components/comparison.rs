use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;
use std::{fmt, path::Path, str::FromStr};

use crate::{
    components::{
        backends::gdal_backend::GdalFile,
        file::File,
        info::RasterInfo,
    },
    errors::{QaqcError, Result},
};

pub const META_KEYS_MATCH: &str = "meta_keys_match";
pub const CRS_VAR_ATTRS_MATCH: &str = "crs_var_attrs_match";

/// Outcome recorded for one compared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldMatch {
    Matched(bool),
    /// One outcome per compared crs variable group.
    PerKey(Vec<bool>),
}

impl FieldMatch {
    pub fn holds(&self, policy: CrsMatchPolicy) -> bool {
        match self {
            FieldMatch::Matched(matched) => *matched,
            FieldMatch::PerKey(matches) => policy.reduce(matches),
        }
    }
}

impl From<bool> for FieldMatch {
    fn from(value: bool) -> Self {
        FieldMatch::Matched(value)
    }
}

/// How a per-key crs outcome counts towards the verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrsMatchPolicy {
    /// Every compared group must match.
    All,
    /// At least one compared group must match.
    Any,
    /// Holds whenever at least one group was compared, whatever the outcomes.
    #[default]
    NonEmpty,
}

impl CrsMatchPolicy {
    pub fn reduce(&self, matches: &[bool]) -> bool {
        match self {
            CrsMatchPolicy::All => matches.iter().all(|matched| *matched),
            CrsMatchPolicy::Any => matches.iter().any(|matched| *matched),
            CrsMatchPolicy::NonEmpty => !matches.is_empty(),
        }
    }
}

impl FromStr for CrsMatchPolicy {
    type Err = QaqcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CrsMatchPolicy::All),
            "any" => Ok(CrsMatchPolicy::Any),
            "non-empty" | "non_empty" | "nonempty" => Ok(CrsMatchPolicy::NonEmpty),
            _ => Err(QaqcError::InvalidPolicy(s.into())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Substring selecting the metadata groups of the crs variable.
    pub crs_variable: Option<String>,
    pub strict_crs_match: CrsMatchPolicy,
}

impl CompareOptions {
    pub fn with_crs_variable(mut self, crs_variable: impl Into<String>) -> Self {
        self.crs_variable = Some(crs_variable.into());
        self
    }

    pub fn with_policy(mut self, policy: CrsMatchPolicy) -> Self {
        self.strict_crs_match = policy;
        self
    }
}

/// Per field outcomes of one comparison, in evaluation order.
///
/// Fields that did not apply have no entry.
#[derive(Shrinkwrap, Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonResult(IndexMap<String, FieldMatch>);

impl ComparisonResult {
    fn record(&mut self, key: impl Into<String>, outcome: impl Into<FieldMatch>) {
        self.0.insert(key.into(), outcome.into());
    }

    /// Logical and over every recorded outcome.
    pub fn verdict(&self, policy: CrsMatchPolicy) -> bool {
        self.0.values().all(|outcome| outcome.holds(policy))
    }

    /// Keys of the entries that do not hold under `policy`.
    pub fn mismatches(&self, policy: CrsMatchPolicy) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, outcome)| !outcome.holds(policy))
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.0.iter().format_with(", ", |(key, outcome), f| match outcome {
            FieldMatch::Matched(matched) => f(&format_args!("{key}: {matched}")),
            FieldMatch::PerKey(matches) => f(&format_args!("{key}: {matches:?}")),
        });
        write!(f, "{{{entries}}}")
    }
}

fn same_suffix(check: &Path, reference: &Path) -> Result<()> {
    if check.extension() == reference.extension() {
        Ok(())
    } else {
        Err(QaqcError::SuffixMismatch {
            check: check.to_path_buf(),
            reference: reference.to_path_buf(),
        })
    }
}

/// Compare the crs variable groups of the reference against the checked info.
///
/// `None` when the reference names a group the checked info lacks.
fn crs_group_matches(
    check: &RasterInfo,
    reference: &RasterInfo,
    crs_variable: &str,
) -> Option<Vec<bool>> {
    reference
        .metadata
        .iter()
        .filter(|(group, _)| group.contains(crs_variable))
        .map(|(group, attributes)| match check.metadata.get(group) {
            Some(check_attributes) => Some(check_attributes == attributes),
            None => {
                warn!("crs variable group {group:?} missing from checked file");
                None
            }
        })
        .collect()
}

/// Evaluate the comparison rules on two info snapshots.
///
/// The reference decides which top level fields are expected.
pub fn compare_info(
    check: &RasterInfo,
    reference: &RasterInfo,
    options: &CompareOptions,
) -> (bool, ComparisonResult) {
    let mut result = ComparisonResult::default();

    let meta_keys_match = check.global_keys() == reference.global_keys();
    debug!("{META_KEYS_MATCH}: {meta_keys_match}");
    result.record(META_KEYS_MATCH, meta_keys_match);

    if let (true, Some(crs_variable)) = (meta_keys_match, options.crs_variable.as_deref()) {
        let outcome = match crs_group_matches(check, reference, crs_variable) {
            Some(matches) => FieldMatch::PerKey(matches),
            None => FieldMatch::Matched(false),
        };
        debug!("{CRS_VAR_ATTRS_MATCH}: {outcome:?}");
        result.record(CRS_VAR_ATTRS_MATCH, outcome);
    }

    for field in reference.present_fields() {
        let matched = check.field_matches(reference, field);
        debug!("{}: {matched}", field.match_key());
        result.record(field.match_key(), matched);
    }

    (result.verdict(options.strict_crs_match), result)
}

/// Compare the info of `check` against `reference`, reading both with `F`.
pub fn compare<F: File>(
    check: impl AsRef<Path>,
    reference: impl AsRef<Path>,
    options: &CompareOptions,
) -> Result<(bool, ComparisonResult)> {
    let (check, reference) = (check.as_ref(), reference.as_ref());
    same_suffix(check, reference)?;

    let check_info = F::open(check)?.info()?;
    let reference_info = F::open(reference)?.info()?;
    let (info_equal, result) = compare_info(&check_info, &reference_info, options);
    info!(
        "{} vs {}: info_equal={info_equal} {result}",
        check.display(),
        reference.display()
    );
    Ok((info_equal, result))
}

/// Compare two raster files through gdal with the default crs policy.
pub fn compare_files(
    check: impl AsRef<Path>,
    reference: impl AsRef<Path>,
    crs_variable: Option<&str>,
) -> Result<(bool, ComparisonResult)> {
    let options = CompareOptions {
        crs_variable: crs_variable.map(String::from),
        ..Default::default()
    };
    compare::<GdalFile>(check, reference, &options)
}
