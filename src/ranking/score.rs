use crate::ranking::types::{MeasurementRow, ScoredRow};

/// Multiplier on relative error (percent) in the composite weight.
pub const ERROR_WEIGHT: f64 = 2.0;

/// Multiplier on fixed-point time (ns) in the composite weight.
pub const PERFORMANCE_WEIGHT: f64 = 1.0;

/// Bumped whenever the weighting constants change, since that changes rankings.
pub const ALGORITHM_VERSION: u8 = 1;

/// Coefficients of the composite weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub error: f64,
    pub performance: f64,
}

impl ScoreWeights {
    pub const STANDARD: ScoreWeights = ScoreWeights {
        error: ERROR_WEIGHT,
        performance: PERFORMANCE_WEIGHT,
    };
}

/// `weight = error * relative_error + performance * fixed_point_time_ns`.
///
/// Computed in `f64` so heavy scales (10^9 ns and up) cannot overflow.
pub fn score_row(row: &MeasurementRow, weights: &ScoreWeights) -> ScoredRow {
    let weight =
        weights.error * row.relative_error + weights.performance * row.fixed_point_time_ns as f64;

    ScoredRow { row: *row, weight }
}

pub fn score_rows(rows: &[MeasurementRow], weights: &ScoreWeights) -> Vec<ScoredRow> {
    rows.iter().map(|r| score_row(r, weights)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(relative_error: f64, fixed_point_time_ns: u64) -> MeasurementRow {
        MeasurementRow {
            scale_exponent: 1,
            relative_error,
            fixed_point_time_ns,
            decimal_time_ns: 0,
        }
    }

    #[test]
    fn test_score_row_formula() {
        let scored = score_row(&row(2.0, 200), &ScoreWeights::STANDARD);
        assert_eq!(scored.weight, 204.0);

        let scored = score_row(&row(10.0, 50), &ScoreWeights::STANDARD);
        assert_eq!(scored.weight, 70.0);
    }

    #[test]
    fn test_score_row_ignores_decimal_time() {
        let mut a = row(1.0, 100);
        let b = a;
        a.decimal_time_ns = 1_000_000;
        assert_eq!(
            score_row(&a, &ScoreWeights::STANDARD).weight,
            score_row(&b, &ScoreWeights::STANDARD).weight
        );
    }

    #[test]
    fn test_score_row_large_times() {
        let scored = score_row(&row(0.0, 5_000_000_000_000), &ScoreWeights::STANDARD);
        assert_eq!(scored.weight, 5e12);
    }

    #[test]
    fn test_score_rows_preserves_order() {
        let rows = vec![row(3.0, 1), row(1.0, 1)];
        let scored = score_rows(&rows, &ScoreWeights::STANDARD);
        assert_eq!(scored[0].row, rows[0]);
        assert_eq!(scored[1].row, rows[1]);
    }

    proptest! {
        #[test]
        fn weight_grows_with_error(err in 0.0f64..1e6, delta in 0.001f64..1e3, ns in 0u64..1_000_000_000) {
            let lo = score_row(&row(err, ns), &ScoreWeights::STANDARD);
            let hi = score_row(&row(err + delta, ns), &ScoreWeights::STANDARD);
            prop_assert!(hi.weight > lo.weight);
        }

        #[test]
        fn weight_grows_with_time(err in 0.0f64..1e6, ns in 0u64..1_000_000_000, delta in 1u64..1_000_000) {
            let lo = score_row(&row(err, ns), &ScoreWeights::STANDARD);
            let hi = score_row(&row(err, ns + delta), &ScoreWeights::STANDARD);
            prop_assert!(hi.weight > lo.weight);
        }
    }
}
