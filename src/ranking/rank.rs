use crate::ranking::types::{RankedRow, ScoredRow};

/// Orders scored rows by ascending weight and numbers them from 1.
///
/// The sort is stable: equal weights keep their input order and still get
/// distinct, consecutive ranks.
pub fn rank_rows(scored: &[ScoredRow]) -> Vec<RankedRow> {
    let mut sorted = scored.to_vec();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, scored)| RankedRow { rank: i + 1, scored })
        .collect()
}
