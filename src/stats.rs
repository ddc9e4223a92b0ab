//! Descriptive statistics over numeric sequences.
//!
//! All functions borrow their input and never mutate it. `mean` and
//! `median` fail with [`AggregateError::EmptyInput`] on an empty slice.

use crate::error::{AggregateError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Sum of all values, `0` for an empty slice.
///
/// Overflow follows the native `i64` behavior (panics in debug builds,
/// wraps in release builds).
pub fn sum(values: &[i64]) -> i64 {
    values.iter().sum()
}

/// Arithmetic mean of integer values.
pub fn mean(values: &[i64]) -> Result<f64> {
    if values.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    Ok(sum(values) as f64 / values.len() as f64)
}

/// Median of floating-point values.
///
/// The input is copied and the copy is sorted; the result is always read
/// from the sorted copy. NaN values are rejected.
pub fn median(values: &[f64]) -> Result<f64> {
    let sorted = sorted_copy(values)?;
    Ok(median_of_sorted(&sorted))
}

/// Copy and sort ascending, rejecting empty input and NaN values.
fn sorted_copy(values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    if let Some(index) = values.iter().position(|v| v.is_nan()) {
        return Err(AggregateError::NotANumber { index });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    trace!("Sorted {} values for median", sorted.len());

    Ok(sorted)
}

/// Median of an already sorted, non-empty slice.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Combined summary of a numeric sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Sum of all values.
    pub sum: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (from the sorted values).
    pub median: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Summary {
    /// Build a summary from floating-point values.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let sorted = sorted_copy(values)?;
        let total: f64 = sorted.iter().sum();

        Ok(Self {
            count: sorted.len(),
            sum: total,
            mean: total / sorted.len() as f64,
            median: median_of_sorted(&sorted),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }

    /// Build a summary from integer values.
    ///
    /// The sum is computed in checked integer arithmetic so it is exact.
    /// When it would overflow `i64` the summary falls back to floating point.
    pub fn from_integers(values: &[i64]) -> Result<Self> {
        let floats: Vec<f64> = values.iter().map(|&v| v as f64).collect();

        let total = match values.iter().try_fold(0i64, |acc, &v| acc.checked_add(v)) {
            Some(total) => total,
            None => {
                debug!("Integer sum overflows i64, summarizing as floats");
                return Self::from_values(&floats);
            }
        };
        if values.is_empty() {
            return Err(AggregateError::EmptyInput);
        }
        let sorted = sorted_copy(&floats)?;

        Ok(Self {
            count: values.len(),
            sum: total as f64,
            mean: total as f64 / values.len() as f64,
            median: median_of_sorted(&sorted),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        assert_eq!(sum(&[]), 0);
        assert_eq!(sum(&[1, 2, 3]), 6);
        assert_eq!(sum(&[-4, 4, 10]), 10);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1, 2, 3]).unwrap(), 2.0);
        assert_eq!(mean(&[1, 2, 3, 4]).unwrap(), 2.5);
    }

    #[test]
    fn test_mean_matches_sum_over_len() {
        let samples: [&[i64]; 4] = [&[7], &[1, 1, 2], &[-3, 10, 22, 5], &[100, -100, 3]];

        for values in samples {
            let expected = sum(values) as f64 / values.len() as f64;
            assert_eq!(mean(values).unwrap(), expected);
        }
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(mean(&[]), Err(AggregateError::EmptyInput)));
        assert!(matches!(median(&[]), Err(AggregateError::EmptyInput)));
        assert!(matches!(
            Summary::from_values(&[]),
            Err(AggregateError::EmptyInput)
        ));
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[2.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap(), 6.0);
        assert_eq!(
            median(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 9.0]).unwrap(),
            4.5
        );
    }

    #[test]
    fn test_median_reads_sorted_copy() {
        let values = vec![9.0, 1.0, 5.0];
        assert_eq!(median(&values).unwrap(), 5.0);
        // Input must be left untouched
        assert_eq!(values, vec![9.0, 1.0, 5.0]);

        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_median_permutation_invariant() {
        let values = [3.5, -1.0, 8.0, 2.0, 2.0, 10.25];
        let expected = median(&values).unwrap();

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(median(&sorted).unwrap(), expected);

        let mut reversed = values.to_vec();
        reversed.reverse();
        assert_eq!(median(&reversed).unwrap(), expected);

        for shift in 0..values.len() {
            let mut rotated = values.to_vec();
            rotated.rotate_left(shift);
            assert_eq!(median(&rotated).unwrap(), expected);
        }
    }

    #[test]
    fn test_median_rejects_nan() {
        let result = median(&[1.0, f64::NAN, 3.0]);
        assert!(matches!(result, Err(AggregateError::NotANumber { index: 1 })));
    }

    #[test]
    fn test_summary_from_values() {
        let summary = Summary::from_values(&[4.0, 1.0, 2.5, 0.5]).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.sum, 8.0);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.median, 1.75);
        assert_eq!(summary.min, 0.5);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_summary_from_integers_overflow_falls_back() {
        let summary = Summary::from_integers(&[i64::MAX, 1]).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.sum, i64::MAX as f64 + 1.0);
        assert!(summary.sum > 0.0);
        assert_eq!(summary.max, i64::MAX as f64);
        assert_eq!(summary.min, 1.0);

        assert!(matches!(
            Summary::from_integers(&[]),
            Err(AggregateError::EmptyInput)
        ));
    }

    #[test]
    fn test_summary_from_integers() {
        let summary = Summary::from_integers(&[3, 1, 2]).unwrap();

        assert_eq!(summary.count, 3);
        assert_eq!(summary.sum, 6.0);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.median, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
    }
}
