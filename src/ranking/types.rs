//! Data types flowing through the ranking pipeline.

use serde::Serialize;

/// One scale's measurement, as read from a benchmark export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementRow {
    /// `n` for a problem size of `2^n`.
    pub scale_exponent: u32,
    /// Accuracy loss of the fixed-point result, in percent.
    pub relative_error: f64,
    pub fixed_point_time_ns: u64,
    pub decimal_time_ns: u64,
}

/// A measurement with its composite weight. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredRow {
    pub row: MeasurementRow,
    pub weight: f64,
}

/// A scored measurement with its 1-based position in the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub scored: ScoredRow,
}

impl RankedRow {
    pub fn row(&self) -> &MeasurementRow {
        &self.scored.row
    }

    pub fn weight(&self) -> f64 {
        self.scored.weight
    }
}
