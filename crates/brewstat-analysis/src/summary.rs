//! Column summaries of a filtered view

use brewstat_stats::summary::SummaryStats;
use serde::Serialize;

use crate::{dataset::FilteredView, record::NumericColumn};

/// Summary statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: NumericColumn,
    #[serde(flatten)]
    pub stats: SummaryStats,
}

/// Summarizes the given columns, in the order given.
#[must_use]
pub fn summarize_columns(view: &FilteredView, columns: &[NumericColumn]) -> Vec<ColumnSummary> {
    columns
        .iter()
        .map(|&column| ColumnSummary {
            column,
            stats: SummaryStats::new(view.column_values(column)),
        })
        .collect()
}

/// Summarizes every numeric column.
#[must_use]
pub fn summarize(view: &FilteredView) -> Vec<ColumnSummary> {
    summarize_columns(view, &NumericColumn::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BatchRecord;

    fn record(quality: f64, bitterness: f64) -> BatchRecord {
        BatchRecord {
            quality_score: quality,
            bitterness,
            ..BatchRecord::default()
        }
    }

    #[test]
    fn test_hand_computed_summary() {
        let view = FilteredView::new(vec![
            record(2.0, 1.0),
            record(4.0, f64::NAN),
            record(4.0, 3.0),
            record(4.0, f64::NAN),
            record(5.0, 5.0),
            record(5.0, f64::NAN),
            record(7.0, f64::NAN),
            record(9.0, f64::NAN),
        ]);
        let summaries = summarize_columns(&view, &[NumericColumn::QualityScore, NumericColumn::Bitterness]);

        let quality = &summaries[0];
        assert_eq!(quality.column, NumericColumn::QualityScore);
        assert_eq!(quality.stats.count, 8);
        assert_eq!(quality.stats.mean, Some(5.0));
        // sum of squared deviations is 32, over n - 1 = 7
        let std = quality.stats.std.unwrap();
        assert!((std - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(quality.stats.min, Some(2.0));
        assert_eq!(quality.stats.p25, Some(4.0));
        assert_eq!(quality.stats.p50, Some(4.5));
        assert_eq!(quality.stats.p75, Some(5.5));
        assert_eq!(quality.stats.max, Some(9.0));

        let bitterness = &summaries[1];
        assert_eq!(bitterness.stats.count, 3);
        assert_eq!(bitterness.stats.p50, Some(3.0));
        assert_eq!(bitterness.stats.std, Some(2.0));
    }

    #[test]
    fn test_every_column_summarized() {
        let summaries = summarize(&FilteredView::default());
        assert_eq!(summaries.len(), NumericColumn::ALL.len());
        assert!(summaries.iter().all(|s| s.stats == SummaryStats::default()));
    }

    #[test]
    fn test_serializes_flat() {
        let view = FilteredView::new(vec![record(3.0, 1.0)]);
        let json = serde_json::to_value(&summarize_columns(&view, &[NumericColumn::QualityScore])[0]).unwrap();
        assert_eq!(json["column"], "quality_score");
        assert_eq!(json["count"], 1);
        assert_eq!(json["mean"], 3.0);
        assert!(json["std"].is_null());
    }
}
