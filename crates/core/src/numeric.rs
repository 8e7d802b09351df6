//! Decimal normalization for values that round-trip through state.
//!
//! Rounding goes through a fixed-precision text rendering so that values such as
//! `0.1 + 0.2` settle on the same binary representation on every apply.

/// Fractional digits kept for threshold values.
pub const THRESHOLD_PRECISION: usize = 2;
/// Fractional digits kept for historic-baseline matrix cells.
pub const BASELINE_PRECISION: usize = 4;

/// Round `value` to `digits` fractional digits via format-then-parse.
pub fn round_decimal(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}

pub fn round_threshold(value: f64) -> f64 {
    round_decimal(value, THRESHOLD_PRECISION)
}

pub fn round_baseline(value: f64) -> f64 {
    round_decimal(value, BASELINE_PRECISION)
}

/// Apply [`round_baseline`] to every cell of a baseline matrix.
pub fn round_baseline_matrix(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    matrix
        .iter()
        .map(|row| row.iter().copied().map(round_baseline).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_drift_is_removed() {
        let sum = 0.1 + 0.2;
        assert_ne!(sum, 0.3);
        assert_eq!(round_threshold(sum), 0.3);
    }

    #[test]
    fn rounding_is_idempotent() {
        for v in [100.0, 99.999, 12.345, -3.14159, 0.005] {
            let once = round_threshold(v);
            assert_eq!(round_threshold(once), once);
        }
    }

    #[test]
    fn baseline_keeps_four_digits() {
        assert_eq!(round_baseline(1.234_56), 1.2346);
        assert_eq!(
            round_baseline_matrix(&[vec![1.0, 2.000_01], vec![0.123_449]]),
            vec![vec![1.0, 2.0], vec![0.1234]]
        );
    }
}
