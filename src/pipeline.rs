//! Drives each variant through load, warm-up removal, scoring and ranking.

use tracing::{info, warn};

use crate::config::{RankerConfig, VariantConfig};
use crate::error::Result;
use crate::ranking::{
    MeasurementRow, RankedRow, ScoreWeights, ScoredRow, drop_warmup, load_file, rank_rows,
    score_rows,
};

/// A benchmark export to rank under a named variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub variant: String,
    pub path: String,
}

impl SourceSpec {
    pub fn new(variant: &str, path: &str) -> Self {
        Self {
            variant: variant.to_string(),
            path: path.to_string(),
        }
    }
}

/// Everything one variant's run produced.
///
/// `scored` is in source order (used for chart series); `ranked` is in rank
/// order (used for the table).
#[derive(Debug, Clone)]
pub struct VariantOutcome {
    pub variant: VariantConfig,
    pub scored: Vec<ScoredRow>,
    pub ranked: Vec<RankedRow>,
}

/// Runs the stages for already-loaded rows.
pub fn rank_variant(
    variant: &VariantConfig,
    rows: &[MeasurementRow],
    weights: &ScoreWeights,
) -> Result<VariantOutcome> {
    let sanitized = drop_warmup(&variant.name, rows)?;
    let scored = score_rows(&sanitized, weights);
    let ranked = rank_rows(&scored);

    if let Some(best) = ranked.first() {
        info!(
            variant = %variant.name,
            scales = ranked.len(),
            best_scale = best.row().scale_exponent,
            best_weight = best.weight(),
            "Variant ranked"
        );
    }

    Ok(VariantOutcome {
        variant: variant.clone(),
        scored,
        ranked,
    })
}

/// Loads `path` with the variant's column mapping, then ranks it.
#[tracing::instrument(skip(variant, weights), fields(variant = %variant.name))]
pub fn run_variant(
    variant: &VariantConfig,
    path: &str,
    weights: &ScoreWeights,
) -> Result<VariantOutcome> {
    let rows = load_file(path, &variant.columns)?;
    rank_variant(variant, &rows, weights)
}

/// Ranks every source, concurrently, returning outcomes in `sources` order.
///
/// Variants share nothing, so each runs as its own blocking task. The first
/// failure (in `sources` order) aborts the whole run.
pub async fn run_all(
    config: &RankerConfig,
    sources: &[SourceSpec],
    weights: ScoreWeights,
) -> Result<Vec<VariantOutcome>> {
    let mut tasks = Vec::with_capacity(sources.len());
    for source in sources {
        let variant = config.variant(&source.variant)?.clone();
        let path = source.path.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            run_variant(&variant, &path, &weights)
        }));
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    for (task, source) in tasks.into_iter().zip(sources) {
        match task.await? {
            Ok(o) => outcomes.push(o),
            Err(e) => {
                warn!(variant = %source.variant, path = %source.path, error = %e, "Variant failed");
                return Err(e);
            }
        }
    }

    Ok(outcomes)
}
