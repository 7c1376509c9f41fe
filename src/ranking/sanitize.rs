use tracing::debug;

use crate::error::{RankError, Result};
use crate::ranking::types::MeasurementRow;

/// Drops the first recorded scale, which carries JIT and cache warm-up noise.
///
/// Purely positional: index 0 goes, everything else is returned untouched
/// and in order. Fewer than two rows leaves nothing to rank.
pub fn drop_warmup(variant: &str, rows: &[MeasurementRow]) -> Result<Vec<MeasurementRow>> {
    if rows.len() < 2 {
        return Err(RankError::EmptyDataset {
            variant: variant.to_string(),
            rows: rows.len(),
        });
    }

    debug!(
        variant,
        dropped_scale = rows[0].scale_exponent,
        remaining = rows.len() - 1,
        "Dropped warm-up row"
    );
    Ok(rows[1..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(n: u32) -> MeasurementRow {
        MeasurementRow {
            scale_exponent: n,
            relative_error: n as f64,
            fixed_point_time_ns: 10 * n as u64,
            decimal_time_ns: 20 * n as u64,
        }
    }

    #[test]
    fn test_drop_warmup_removes_first_row() {
        let rows = vec![row(0), row(1), row(2)];
        let sanitized = drop_warmup("plain", &rows).unwrap();
        assert_eq!(sanitized, vec![row(1), row(2)]);
    }

    #[test]
    fn test_drop_warmup_two_rows() {
        let sanitized = drop_warmup("plain", &[row(4), row(5)]).unwrap();
        assert_eq!(sanitized, vec![row(5)]);
    }

    #[test]
    fn test_drop_warmup_single_row_fails() {
        let err = drop_warmup("average", &[row(0)]).unwrap_err();
        assert!(matches!(
            err,
            RankError::EmptyDataset { ref variant, rows: 1 } if variant == "average"
        ));
    }

    #[test]
    fn test_drop_warmup_empty_fails() {
        assert!(matches!(
            drop_warmup("median", &[]),
            Err(RankError::EmptyDataset { rows: 0, .. })
        ));
    }

    proptest! {
        #[test]
        fn drop_warmup_is_positional(len in 2usize..40) {
            // Descending scales: the rule must not depend on order or values.
            let rows: Vec<_> = (0..len as u32).rev().map(row).collect();
            let sanitized = drop_warmup("plain", &rows).unwrap();
            prop_assert_eq!(sanitized.len(), rows.len() - 1);
            prop_assert_eq!(sanitized[0], rows[1]);
            prop_assert_eq!(&sanitized[..], &rows[1..]);
        }
    }
}
