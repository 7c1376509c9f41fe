//! Flattened numeric series for external chart rendering.
//!
//! Series follow scale order as loaded, never rank order, so plots are
//! unaffected by the weighting.

use std::fs;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::pipeline::VariantOutcome;
use crate::ranking::ALGORITHM_VERSION;
use crate::ranking::types::ScoredRow;

/// `(scale_exponent, relative_error)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorPoint {
    pub scale: u32,
    pub relative_error: f64,
}

/// `(scale_exponent, fixed_point_time_ns, decimal_time_ns)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimePoint {
    pub scale: u32,
    pub fixed_point_ns: u64,
    pub decimal_ns: u64,
}

/// Both series for one variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSeries {
    pub variant: String,
    pub title: String,
    pub error_series: Vec<ErrorPoint>,
    pub time_series: Vec<TimePoint>,
}

/// Top-level document handed to the plotting backend.
#[derive(Debug, Serialize)]
pub struct ChartSeries {
    pub schema_version: u8,
    pub algorithm_version: u8,
    pub generated_at: DateTime<Utc>,
    pub variants: Vec<VariantSeries>,
}

pub fn error_series(rows: &[ScoredRow]) -> Vec<ErrorPoint> {
    rows.iter()
        .map(|s| ErrorPoint {
            scale: s.row.scale_exponent,
            relative_error: s.row.relative_error,
        })
        .collect()
}

pub fn time_series(rows: &[ScoredRow]) -> Vec<TimePoint> {
    rows.iter()
        .map(|s| TimePoint {
            scale: s.row.scale_exponent,
            fixed_point_ns: s.row.fixed_point_time_ns,
            decimal_ns: s.row.decimal_time_ns,
        })
        .collect()
}

impl VariantSeries {
    pub fn from_outcome(outcome: &VariantOutcome) -> Self {
        Self {
            variant: outcome.variant.name.clone(),
            title: outcome.variant.title.clone(),
            error_series: error_series(&outcome.scored),
            time_series: time_series(&outcome.scored),
        }
    }
}

impl ChartSeries {
    pub fn from_outcomes(outcomes: &[VariantOutcome]) -> Self {
        Self {
            schema_version: 1,
            algorithm_version: ALGORITHM_VERSION,
            generated_at: Utc::now(),
            variants: outcomes.iter().map(VariantSeries::from_outcome).collect(),
        }
    }

    /// Renders the document as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes an already-rendered series document to `path`.
pub fn write_series(path: &str, body: &str) -> Result<()> {
    fs::write(path, body)?;
    info!(path, bytes = body.len(), "Chart series written");
    Ok(())
}
