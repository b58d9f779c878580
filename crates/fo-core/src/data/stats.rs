//! Numeric kernels shared by typed series and dynamic columns
//!
//! Every function takes the present values only; callers strip absent slots
//! (and, for dynamic columns, non-numeric cells) before calling in.

use ndarray::ArrayView1;

use super::{DataError, Result};

pub(crate) fn sum(values: &[f64]) -> f64 {
    ArrayView1::from(values).sum()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    ArrayView1::from(values).mean()
}

/// Bessel-corrected variance; `None` below two values
pub(crate) fn sample_var(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(ArrayView1::from(values).var(1.0))
}

pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    sample_var(values).map(f64::sqrt)
}

pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Median of values already sorted ascending
pub(crate) fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Linear-interpolation percentile of values already sorted ascending
pub(crate) fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let n = sorted.len();
    let index = (n as f64 - 1.0) * p;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        Some(sorted[lower])
    } else {
        let weight = index - lower as f64;
        Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
    }
}

pub(crate) fn check_fraction(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DataError::InvalidParameter(format!(
            "percentile must lie in [0, 1], got {p}"
        )))
    }
}

/// Adjusted sample skewness; `None` below three values
pub(crate) fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }

    let mean = mean(values)?;
    let std = sample_std(values)?;
    let cubed: f64 = values.iter().map(|&x| ((x - mean) / std).powi(3)).sum();
    let n = n as f64;

    Some(n / ((n - 1.0) * (n - 2.0)) * cubed)
}

/// Equal-width histogram over `[min, max]`
///
/// The maximum lands in the last bin. A zero range puts every value in bin 0.
pub(crate) fn histogram(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];
    let range = max - min;

    for &x in values {
        let bin = if range > 0.0 {
            (((x - min) * bins as f64 / range).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[bin] += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let sorted = sorted(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(percentile(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile(&sorted, 1.0), Some(4.0));
        assert!((percentile(&sorted, 0.5).unwrap() - 2.5).abs() < 1e-12);
        assert!((percentile(&sorted, 0.25).unwrap() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_clamps_maximum() {
        assert_eq!(histogram(&[0.0, 5.0, 10.0], 0.0, 10.0, 2), vec![1, 2]);
        assert_eq!(histogram(&[3.0, 3.0], 3.0, 3.0, 4), vec![2, 0, 0, 0]);
    }

    #[test]
    fn test_skewness_of_symmetric_data_is_zero() {
        let skew = skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(skew.abs() < 1e-12);
        assert_eq!(skewness(&[1.0, 2.0]), None);
    }

    #[test]
    fn test_sample_var_needs_two_values() {
        assert_eq!(sample_var(&[1.0]), None);
        assert!((sample_var(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap() - 2.5).abs() < 1e-12);
    }
}
