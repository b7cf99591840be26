//! Box-plot whisker statistics
//!
//! Quartiles are computed by linear interpolation between order statistics
//! (see [`compute_percentile`]). Whiskers extend `multiplier × IQR` beyond the
//! quartiles and are then clipped to the observed extrema, so they never
//! reach past the data. Outliers are neither flagged nor removed.
//!
//! A negative or `NaN` multiplier is treated as zero, so the whiskers always
//! enclose the quartiles.
//!
//! # Examples
//!
//! ```
//! use brewstat_stats::whisker::{DEFAULT_WHISKER_MULTIPLIER, WhiskerStats};
//!
//! let stats = WhiskerStats::new([10.0, 20.0], DEFAULT_WHISKER_MULTIPLIER).unwrap();
//! assert_eq!(stats.lower_quartile, 12.5);
//! assert_eq!(stats.upper_quartile, 17.5);
//! assert_eq!(stats.iqr, 5.0);
//! // raw bounds 5.0 and 25.0 are clipped to the observed range
//! assert_eq!(stats.lower_whisker, 10.0);
//! assert_eq!(stats.upper_whisker, 20.0);
//! ```

use serde::Serialize;

use crate::percentiles::compute_percentile;

/// Conventional box-plot whisker reach, in multiples of the IQR.
pub const DEFAULT_WHISKER_MULTIPLIER: f64 = 1.5;

/// Quartiles, extrema and clipped whisker bounds of one group of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WhiskerStats {
    /// 25th percentile
    pub lower_quartile: f64,
    /// 75th percentile
    pub upper_quartile: f64,
    pub min: f64,
    pub max: f64,
    /// `upper_quartile - lower_quartile`
    pub iqr: f64,
    /// `max(lower_quartile - multiplier * iqr, min)`
    pub lower_whisker: f64,
    /// `min(upper_quartile + multiplier * iqr, max)`
    pub upper_whisker: f64,
}

impl WhiskerStats {
    /// Computes whisker statistics from unsorted values, ignoring non-finite ones.
    ///
    /// Returns `None` when no finite value remains.
    #[must_use]
    pub fn new<I>(values: I, multiplier: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, multiplier)
    }

    /// Computes whisker statistics from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], multiplier: f64) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let lower_quartile = compute_percentile(sorted_values, 25.0);
        let upper_quartile = compute_percentile(sorted_values, 75.0);
        let iqr = upper_quartile - lower_quartile;
        let multiplier = multiplier.max(0.0);

        let raw_lower = lower_quartile - multiplier * iqr;
        let raw_upper = upper_quartile + multiplier * iqr;

        Some(Self {
            lower_quartile,
            upper_quartile,
            min,
            max,
            iqr,
            lower_whisker: raw_lower.max(min),
            upper_whisker: raw_upper.min(max),
        })
    }
}
