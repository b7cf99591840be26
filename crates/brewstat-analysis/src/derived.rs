//! Derived per-row metrics
//!
//! The only derived metric is the sales/volume ratio,
//! `total_sales / volume_produced`. A row whose volume is zero, missing or
//! non-finite (or whose sales are missing) has no ratio; this is reported as
//! `None` for that row and never as an error.
//!
//! [`DerivedView`] pairs a [`FilteredView`] with its ratio column without
//! touching the rows, so every [`Measure`] can be read through one accessor.

use crate::{
    dataset::FilteredView,
    record::{BatchRecord, Measure},
};

/// `total_sales / volume_produced`, or `None` when undefined.
///
/// # Examples
///
/// ```
/// use brewstat_analysis::{derived::sales_volume_ratio, record::BatchRecord};
///
/// let mut record = BatchRecord { total_sales: 100.0, volume_produced: 40.0, ..Default::default() };
/// assert_eq!(sales_volume_ratio(&record), Some(2.5));
///
/// record.volume_produced = 0.0;
/// assert_eq!(sales_volume_ratio(&record), None);
/// ```
#[must_use]
pub fn sales_volume_ratio(record: &BatchRecord) -> Option<f64> {
    let volume = record.volume_produced;
    if !volume.is_finite() || volume == 0.0 {
        return None;
    }
    Some(record.total_sales / volume).filter(|ratio| ratio.is_finite())
}

/// A filtered view with its row-aligned derived columns.
#[derive(Debug, Clone)]
pub struct DerivedView<'a> {
    view: &'a FilteredView,
    ratios: Vec<Option<f64>>,
}

impl<'a> DerivedView<'a> {
    #[must_use]
    pub fn new(view: &'a FilteredView) -> Self {
        let ratios = view.records().iter().map(sales_volume_ratio).collect::<Vec<_>>();
        tracing::debug!(
            rows = ratios.len(),
            undefined = ratios.iter().filter(|r| r.is_none()).count(),
            "derived sales/volume ratio"
        );
        Self { view, ratios }
    }

    #[must_use]
    pub fn view(&self) -> &'a FilteredView {
        self.view
    }

    /// Sales/volume ratio per row, aligned with [`FilteredView::records`].
    #[must_use]
    pub fn ratios(&self) -> &[Option<f64>] {
        &self.ratios
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// Value of `measure` in row `row`, or `None` when missing or undefined.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn measure_value(&self, row: usize, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Column(column) => column.defined_value(&self.view.records()[row]),
            Measure::SalesVolumeRatio => self.ratios[row],
        }
    }

    /// Defined values of `measure`, in row order.
    pub fn measure_values(&self, measure: Measure) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).filter_map(move |row| self.measure_value(row, measure))
    }

    /// `(x, y)` pairs of the rows where both measures are defined.
    #[must_use]
    pub fn defined_pairs(&self, x: Measure, y: Measure) -> Vec<(f64, f64)> {
        (0..self.len())
            .filter_map(|row| Some((self.measure_value(row, x)?, self.measure_value(row, y)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NumericColumn;

    fn record(sales: f64, volume: f64) -> BatchRecord {
        BatchRecord {
            total_sales: sales,
            volume_produced: volume,
            bitterness: sales / 10.0,
            ..BatchRecord::default()
        }
    }

    #[test]
    fn test_undefined_ratios() {
        assert_eq!(sales_volume_ratio(&record(100.0, 0.0)), None);
        assert_eq!(sales_volume_ratio(&record(100.0, -0.0)), None);
        assert_eq!(sales_volume_ratio(&record(100.0, f64::NAN)), None);
        assert_eq!(sales_volume_ratio(&record(100.0, f64::INFINITY)), None);
        assert_eq!(sales_volume_ratio(&record(f64::NAN, 10.0)), None);
        assert_eq!(sales_volume_ratio(&record(0.0, 10.0)), Some(0.0));
        assert_eq!(sales_volume_ratio(&record(-30.0, 10.0)), Some(-3.0));
    }

    #[test]
    fn test_ratio_column_aligned_with_rows() {
        let view = FilteredView::new(vec![record(100.0, 50.0), record(70.0, 0.0), record(90.0, 30.0)]);
        let derived = DerivedView::new(&view);
        assert_eq!(derived.ratios(), &[Some(2.0), None, Some(3.0)]);
        assert_eq!(derived.len(), view.len());
        assert_eq!(
            derived.measure_values(Measure::SalesVolumeRatio).collect::<Vec<_>>(),
            vec![2.0, 3.0]
        );
    }

    #[test]
    fn test_recomputation_is_identical_and_view_untouched() {
        let view = FilteredView::new(vec![record(12.5, 3.0), record(8.0, 0.0), record(1e6, 7.0)]);
        let before = view.clone();
        let first = DerivedView::new(&view).ratios().to_vec();
        let second = DerivedView::new(&view).ratios().to_vec();
        assert_eq!(first, second);
        assert_eq!(view, before);
    }

    #[test]
    fn test_defined_pairs_skip_undefined_rows() {
        let view = FilteredView::new(vec![record(100.0, 50.0), record(70.0, 0.0), record(90.0, 30.0)]);
        let derived = DerivedView::new(&view);
        let pairs = derived.defined_pairs(
            Measure::Column(NumericColumn::Bitterness),
            Measure::SalesVolumeRatio,
        );
        assert_eq!(pairs, vec![(10.0, 2.0), (9.0, 3.0)]);
    }

    #[test]
    fn test_empty_view() {
        let view = FilteredView::default();
        let derived = DerivedView::new(&view);
        assert!(derived.is_empty());
        assert!(derived.defined_pairs(Measure::SalesVolumeRatio, Measure::SalesVolumeRatio).is_empty());
    }
}
