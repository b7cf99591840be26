use serde::Serialize;

use crate::{descriptive::DescriptiveStats, percentiles::Percentiles};

/// Column summary combining count, moments, extrema and quartiles.
///
/// Every field other than `count` is absent when the input holds no finite
/// value, so an empty selection still produces a well-defined summary.
///
/// # Examples
///
/// ```
/// use brewstat_stats::summary::SummaryStats;
///
/// let summary = SummaryStats::new([1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(summary.count, 5);
/// assert_eq!(summary.mean, Some(3.0));
/// assert_eq!(summary.p25, Some(2.0));
/// assert_eq!(summary.p75, Some(4.0));
///
/// let empty = SummaryStats::new(Vec::<f64>::new());
/// assert_eq!(empty.count, 0);
/// assert_eq!(empty.mean, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Number of finite values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; absent for fewer than two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl SummaryStats {
    /// Percentile points reported by the summary.
    pub const PERCENTILE_POINTS: [f64; 3] = [25.0, 50.0, 75.0];

    /// Computes the summary from unsorted values, ignoring non-finite ones.
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        let Some(stats) = DescriptiveStats::from_sorted(sorted_values) else {
            return Self::default();
        };
        let percentiles = Percentiles::from_sorted(sorted_values, &Self::PERCENTILE_POINTS);

        Self {
            count: stats.count,
            mean: Some(stats.mean),
            std: stats.std_dev,
            min: Some(stats.min),
            p25: percentiles.get(25.0),
            p50: percentiles.get(50.0),
            p75: percentiles.get(75.0),
            max: Some(stats.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_are_not_counted() {
        let summary = SummaryStats::new([10.0, f64::NAN, 20.0]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.min, Some(10.0));
        assert_eq!(summary.max, Some(20.0));
        assert_eq!(summary.p25, Some(12.5));
        assert_eq!(summary.p50, Some(15.0));
        assert_eq!(summary.p75, Some(17.5));
        assert!((summary.std.unwrap() - 50.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_no_std() {
        let summary = SummaryStats::new([3.0]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.std, None);
        assert_eq!(summary.p25, Some(3.0));
        assert_eq!(summary.p75, Some(3.0));
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(SummaryStats::new(Vec::<f64>::new()), SummaryStats::default());
    }
}
