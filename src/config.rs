//! Per-variant column mapping and report layout.
//!
//! The average and median benchmark exports differ only in their column
//! names, so both run through one pipeline parameterized by a
//! [`VariantConfig`]. The built-in defaults can be replaced by a JSON file:
//!
//! ```json
//! {
//!   "variants": [
//!     {
//!       "name": "average",
//!       "title": "Average Benchmarks",
//!       "columns": {
//!         "scale": "n",
//!         "relative_error": "relError_avg",
//!         "fixed_point_time": "fpNs_avg",
//!         "decimal_time": "decimalNs_avg"
//!       },
//!       "time_width": 14
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};

/// Source column names for the four measurement fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub scale: String,
    pub relative_error: String,
    pub fixed_point_time: String,
    pub decimal_time: String,
}

impl ColumnMap {
    /// Columns `n`, `relError{suffix}`, `fpNs{suffix}`, `decimalNs{suffix}`.
    pub fn with_suffix(suffix: &str) -> Self {
        Self {
            scale: "n".to_string(),
            relative_error: format!("relError{suffix}"),
            fixed_point_time: format!("fpNs{suffix}"),
            decimal_time: format!("decimalNs{suffix}"),
        }
    }
}

/// One aggregation variant: where its columns live and how its section looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    pub title: String,
    pub columns: ColumnMap,
    #[serde(default = "default_time_width")]
    pub time_width: usize,
}

fn default_time_width() -> usize {
    10
}

impl VariantConfig {
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            title: "Benchmarks".to_string(),
            columns: ColumnMap::with_suffix(""),
            time_width: 10,
        }
    }

    pub fn average() -> Self {
        Self {
            name: "average".to_string(),
            title: "Average Benchmarks".to_string(),
            columns: ColumnMap::with_suffix("_avg"),
            time_width: 14,
        }
    }

    pub fn median() -> Self {
        Self {
            name: "median".to_string(),
            title: "Median Benchmarks".to_string(),
            columns: ColumnMap::with_suffix("_med"),
            time_width: 14,
        }
    }
}

/// The set of variants a run may reference by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankerConfig {
    pub variants: Vec<VariantConfig>,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            variants: vec![
                VariantConfig::plain(),
                VariantConfig::average(),
                VariantConfig::median(),
            ],
        }
    }
}

impl RankerConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RankError::Config(format!("{path}: {e}")))?;
        Self::from_json(&content).map_err(|e| match e {
            RankError::Config(msg) => RankError::Config(format!("{path}: {msg}")),
            other => other,
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: RankerConfig =
            serde_json::from_str(content).map_err(|e| RankError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (i, v) in self.variants.iter().enumerate() {
            if v.name.trim().is_empty() {
                return Err(RankError::Config(format!("variant #{} has an empty name", i + 1)));
            }
            if self.variants[..i].iter().any(|prev| prev.name == v.name) {
                return Err(RankError::Config(format!("duplicate variant '{}'", v.name)));
            }
        }
        Ok(())
    }

    /// Returns the variant called `name`, if one is configured.
    pub fn variant(&self, name: &str) -> Result<&VariantConfig> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| RankError::UnknownVariant(name.to_string()))
    }

    /// Iterates over all configured variant names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }
}
