//! Descriptive statistics over cleaned numeric columns.
//!
//! Quantiles use linear interpolation between the closest ranks; the
//! outlier bounds and the tier thresholds both rely on this estimator.

/// Linear-interpolation quantile of `values` at `tau` in `[0, 1]`.
///
/// Returns `None` for an empty slice or an out-of-range `tau`.
pub fn quantile(values: &[f64], tau: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&tau) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (sorted.len() - 1) as f64 * tau;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let weight = rank - lo as f64;
    Some(sorted[lo] * (1.0 - weight) + sorted[hi] * weight)
}

/// Median (the 0.5 quantile).
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Maximum value.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&values, 0.25).unwrap(), 1.75);
        assert_relative_eq!(quantile(&values, 0.5).unwrap(), 2.5);
        assert_relative_eq!(quantile(&values, 0.75).unwrap(), 3.25);
    }

    #[test]
    fn test_quantile_is_order_independent() {
        let values = [100.0, 120.0, 50.0];
        assert_relative_eq!(quantile(&values, 0.25).unwrap(), 75.0);
        assert_relative_eq!(quantile(&values, 0.75).unwrap(), 110.0);
    }

    #[test]
    fn test_quantile_endpoints() {
        let values = [3.0, 1.0, 2.0];
        assert_relative_eq!(quantile(&values, 0.0).unwrap(), 1.0);
        assert_relative_eq!(quantile(&values, 1.0).unwrap(), 3.0);
    }

    #[test]
    fn test_quantile_empty_and_out_of_range() {
        assert!(quantile(&[], 0.5).is_none());
        assert!(quantile(&[1.0], -0.1).is_none());
        assert!(quantile(&[1.0], 1.1).is_none());
    }

    #[test]
    fn test_median_single_value() {
        assert_relative_eq!(median(&[42.0]).unwrap(), 42.0);
    }

    #[test]
    fn test_median_even_count_averages_middle_pair() {
        assert_relative_eq!(median(&[10.0, 20.0]).unwrap(), 15.0);
    }

    #[test]
    fn test_mean_and_max() {
        let values = [2.0, 4.0, 9.0];
        assert_relative_eq!(mean(&values).unwrap(), 5.0);
        assert_relative_eq!(max(&values).unwrap(), 9.0);
        assert!(mean(&[]).is_none());
        assert!(max(&[]).is_none());
    }
}
