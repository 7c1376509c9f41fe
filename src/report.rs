//! Text rendering and persistence of ranking results.
//!
//! The table layout is consumed by downstream tooling, so column widths and
//! number formats are fixed.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::VariantConfig;
use crate::pipeline::VariantOutcome;
use crate::ranking::types::RankedRow;

const RANK_WIDTH: usize = 5;
const SCALE_WIDTH: usize = 6;
const MIN_ERROR_WIDTH: usize = 12;

/// Column widths for one variant's table.
struct Layout {
    time: usize,
    error: usize,
}

impl Layout {
    fn for_variant(variant: &VariantConfig) -> Self {
        Self {
            time: variant.time_width,
            error: MIN_ERROR_WIDTH.max(variant.columns.relative_error.len()),
        }
    }
}

/// Renders the header line of a variant's ranking table.
pub fn format_header(variant: &VariantConfig) -> String {
    let layout = Layout::for_variant(variant);
    let c = &variant.columns;
    format!(
        "{:<rw$} {:<sw$} {:<tw$} {:<tw$} {:<ew$} {}",
        "rank",
        "scale",
        c.fixed_point_time,
        c.decimal_time,
        c.relative_error,
        "weight",
        rw = RANK_WIDTH,
        sw = SCALE_WIDTH,
        tw = layout.time,
        ew = layout.error,
    )
}

/// Renders one ranked row as a table line.
pub fn format_row(variant: &VariantConfig, ranked: &RankedRow) -> String {
    let layout = Layout::for_variant(variant);
    let row = ranked.row();
    format!(
        "{:<rw$} {:<sw$} {:<tw$} {:<tw$} {:<ew$.6} {:.2}",
        ranked.rank,
        row.scale_exponent,
        row.fixed_point_time_ns,
        row.decimal_time_ns,
        row.relative_error,
        ranked.weight(),
        rw = RANK_WIDTH,
        sw = SCALE_WIDTH,
        tw = layout.time,
        ew = layout.error,
    )
}

/// Aggregates over one variant's ranked scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub mean_error: f64,
    /// Population standard deviation of the relative error.
    pub error_stddev: f64,
    pub mean_fixed_point_ns: f64,
    pub mean_decimal_ns: f64,
}

impl SummaryStats {
    /// Returns `None` when there is nothing ranked.
    pub fn from_ranked(ranked: &[RankedRow]) -> Option<Self> {
        if ranked.is_empty() {
            return None;
        }
        let count = ranked.len() as f64;

        let (error_sum, fp_sum, dec_sum) =
            ranked.iter().fold((0.0, 0.0, 0.0), |(e, fp, dec), r| {
                let row = r.row();
                (
                    e + row.relative_error,
                    fp + row.fixed_point_time_ns as f64,
                    dec + row.decimal_time_ns as f64,
                )
            });
        let mean_error = error_sum / count;

        let error_variance = ranked
            .iter()
            .map(|r| (r.row().relative_error - mean_error).powi(2))
            .sum::<f64>()
            / count;

        Some(Self {
            mean_error,
            error_stddev: error_variance.sqrt(),
            mean_fixed_point_ns: fp_sum / count,
            mean_decimal_ns: dec_sum / count,
        })
    }

    /// Mean decimal time over mean fixed-point time, if the latter is non-zero.
    pub fn time_ratio(&self) -> Option<f64> {
        (self.mean_fixed_point_ns != 0.0).then(|| self.mean_decimal_ns / self.mean_fixed_point_ns)
    }
}

/// Renders the aggregate summary lines for one variant.
pub fn format_summary(ranked: &[RankedRow]) -> Vec<String> {
    let (Some(best), Some(worst), Some(stats)) = (
        ranked.first(),
        ranked.last(),
        SummaryStats::from_ranked(ranked),
    ) else {
        return vec!["no ranked scales".to_string()];
    };

    let ratio = match stats.time_ratio() {
        Some(r) => format!("{:.3}x", r),
        None => "n/a".to_string(),
    };

    vec![
        format!(
            "best scale: n={} (weight {:.2})",
            best.row().scale_exponent,
            best.weight()
        ),
        format!(
            "worst scale: n={} (weight {:.2})",
            worst.row().scale_exponent,
            worst.weight()
        ),
        format!(
            "mean relError: {:.6} (stddev {:.6})",
            stats.mean_error, stats.error_stddev
        ),
        format!("mean fpNs: {:.2}", stats.mean_fixed_point_ns),
        format!("mean decimalNs: {:.2}", stats.mean_decimal_ns),
        format!("decimal/fixed-point time ratio: {}", ratio),
    ]
}

/// Renders a labeled section: title, table in rank order, then the summary.
pub fn format_section(variant: &VariantConfig, ranked: &[RankedRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", variant.title);
    let _ = writeln!(out, "{}", format_header(variant));
    for r in ranked {
        let _ = writeln!(out, "{}", format_row(variant, r));
    }
    out.push('\n');
    for line in format_summary(ranked) {
        let _ = writeln!(out, "{}", line);
    }
    out
}

/// Joins the per-variant sections, in the given order, into one report.
///
/// Sections are rendered independently and separated by a blank line.
pub fn format_report(outcomes: &[VariantOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| format_section(&o.variant, &o.ranked))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the report text to `path`, replacing any existing file.
pub fn write_report(path: &str, report: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    debug!(path, bytes = report.len(), "Writing ranking report");
    fs::write(path, report)?;
    info!(path, "Ranking report written");
    Ok(())
}
