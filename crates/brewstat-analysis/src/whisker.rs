//! Per-group box-plot statistics
//!
//! Groups the rows of a [`FilteredView`] by a categorical column and computes
//! [`WhiskerStats`] over a numeric column for each group. Groups are emitted
//! in lexicographic order of their key. Missing values are skipped, and a
//! group with no finite value left is omitted rather than reported as empty.

use std::collections::BTreeMap;

use brewstat_stats::whisker::WhiskerStats;
use serde::Serialize;

use crate::{
    dataset::FilteredView,
    record::{CategoricalColumn, NumericColumn},
};

/// Whisker statistics of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhiskerRecord {
    pub group_key: String,
    #[serde(flatten)]
    pub stats: WhiskerStats,
}

/// Computes one [`WhiskerRecord`] per distinct value of `group_by` present
/// in the view.
///
/// # Examples
///
/// ```
/// use brewstat_analysis::{
///     dataset::FilteredView,
///     record::{BatchRecord, CategoricalColumn, NumericColumn},
///     whisker,
/// };
///
/// let row = |location: &str, quality_score| BatchRecord {
///     location: location.into(),
///     quality_score,
///     ..Default::default()
/// };
/// let view = FilteredView::new(vec![row("B", 7.0), row("A", 10.0), row("A", 20.0)]);
///
/// let records = whisker::group_whiskers(
///     &view,
///     CategoricalColumn::Location,
///     NumericColumn::QualityScore,
///     1.5,
/// );
/// assert_eq!(records[0].group_key, "A");
/// assert_eq!(records[0].stats.lower_quartile, 12.5);
/// assert_eq!(records[1].group_key, "B");
/// ```
#[must_use]
pub fn group_whiskers(
    view: &FilteredView,
    group_by: CategoricalColumn,
    value: NumericColumn,
    multiplier: f64,
) -> Vec<WhiskerRecord> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in view.records() {
        let values = groups.entry(group_by.value(record)).or_default();
        if let Some(v) = value.defined_value(record) {
            values.push(v);
        }
    }

    groups
        .into_iter()
        .filter_map(|(key, values)| {
            let Some(stats) = WhiskerStats::new(values, multiplier) else {
                tracing::debug!(group = key, column = %value, "group has no defined values");
                return None;
            };
            Some(WhiskerRecord {
                group_key: key.to_owned(),
                stats,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use brewstat_stats::whisker::DEFAULT_WHISKER_MULTIPLIER;
    use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::record::BatchRecord;

    fn record(location: &str, quality: f64) -> BatchRecord {
        BatchRecord {
            location: location.to_owned(),
            quality_score: quality,
            ..BatchRecord::default()
        }
    }

    fn whiskers(view: &FilteredView) -> Vec<WhiskerRecord> {
        group_whiskers(
            view,
            CategoricalColumn::Location,
            NumericColumn::QualityScore,
            DEFAULT_WHISKER_MULTIPLIER,
        )
    }

    #[test]
    fn test_two_value_group() {
        let view = FilteredView::new(vec![record("A", 10.0), record("A", 20.0)]);
        let records = whiskers(&view);
        assert_eq!(records.len(), 1);
        let stats = records[0].stats;
        assert_eq!(records[0].group_key, "A");
        assert_eq!(stats.lower_quartile, 12.5);
        assert_eq!(stats.upper_quartile, 17.5);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 20.0);
        assert_eq!(stats.iqr, 5.0);
        assert_eq!(stats.lower_whisker, 10.0);
        assert_eq!(stats.upper_whisker, 20.0);
    }

    #[test]
    fn test_groups_sorted_and_missing_skipped() {
        let view = FilteredView::new(vec![
            record("Whitefield", 8.0),
            record("Indiranagar", f64::NAN),
            record("Electronic City", 6.5),
            record("Whitefield", f64::NAN),
            record("Electronic City", 7.5),
        ]);
        let records = whiskers(&view);
        let keys = records.iter().map(|r| r.group_key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["Electronic City", "Whitefield"]);
        assert_eq!(records[1].stats.min, 8.0);
        assert_eq!(records[1].stats.iqr, 0.0);
    }

    #[test]
    fn test_empty_view() {
        assert!(whiskers(&FilteredView::default()).is_empty());
    }

    #[test]
    fn test_serializes_flat() {
        let view = FilteredView::new(vec![record("A", 3.0)]);
        let json = serde_json::to_value(&whiskers(&view)[0]).unwrap();
        assert_eq!(json["group_key"], "A");
        assert_eq!(json["lower_whisker"], 3.0);
        assert_eq!(json["iqr"], 0.0);
    }

    #[test]
    fn test_random_groups_partition_rows() {
        let locations = ["A", "B", "C", "D", "E"];
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..30 {
            let len: u32 = rng.random_range(1..80);
            let records = (0..len)
                .map(|_| record(locations.choose(&mut rng).unwrap(), rng.random_range(0.0..10.0)))
                .collect::<Vec<_>>();
            let view = FilteredView::new(records);
            let result = whiskers(&view);

            assert!(result.windows(2).all(|w| w[0].group_key < w[1].group_key));
            for entry in &result {
                let stats = entry.stats;
                assert!(stats.min <= stats.lower_whisker);
                assert!(stats.lower_whisker <= stats.lower_quartile);
                assert!(stats.lower_quartile <= stats.upper_quartile);
                assert!(stats.upper_quartile <= stats.upper_whisker);
                assert!(stats.upper_whisker <= stats.max);
            }
            let present = locations
                .iter()
                .filter(|l| view.records().iter().any(|r| r.location == **l))
                .count();
            assert_eq!(result.len(), present);
        }
    }
}
