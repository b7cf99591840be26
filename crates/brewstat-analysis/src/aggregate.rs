//! Grouped aggregations and frequency tables
//!
//! [`aggregate_by`] reduces a measure per value of a categorical column (for
//! example total sales per SKU). [`frequency`] counts how often each distinct
//! value of a numeric column occurs (for example fermentation time in days).
//! Undefined values are skipped in both.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    dataset::FilteredView,
    derived::DerivedView,
    record::{CategoricalColumn, Measure, NumericColumn},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[display("sum")]
    Sum,
    #[display("mean")]
    Mean,
    #[display("count")]
    Count,
}

impl Aggregation {
    #[expect(clippy::cast_precision_loss)]
    fn reduce(self, values: &[f64]) -> Option<f64> {
        match self {
            Self::Sum => Some(values.iter().sum()),
            Self::Mean => {
                (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
            }
            Self::Count => Some(values.len() as f64),
        }
    }
}

/// Aggregated value of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    pub group_key: String,
    /// `None` only for the mean of a group without defined values.
    pub value: Option<f64>,
}

/// Reduces `measure` per distinct value of `group`, in lexicographic order
/// of the group key.
///
/// Every group present in the view is reported, even when none of its values
/// is defined: such a group sums and counts to zero and has no mean.
///
/// # Examples
///
/// ```
/// use brewstat_analysis::{
///     aggregate::{self, Aggregation},
///     dataset::FilteredView,
///     derived::DerivedView,
///     record::{BatchRecord, CategoricalColumn, NumericColumn},
/// };
///
/// let row = |sku: &str, total_sales| BatchRecord { sku: sku.into(), total_sales, ..Default::default() };
/// let view = FilteredView::new(vec![row("Kegs", 10.0), row("Cans", 4.0), row("Kegs", 5.0)]);
/// let derived = DerivedView::new(&view);
///
/// let totals = aggregate::aggregate_by(
///     &derived,
///     CategoricalColumn::Sku,
///     NumericColumn::TotalSales.into(),
///     Aggregation::Sum,
/// );
/// assert_eq!(totals[0].group_key, "Cans");
/// assert_eq!(totals[1].value, Some(15.0));
/// ```
#[must_use]
pub fn aggregate_by(
    derived: &DerivedView<'_>,
    group: CategoricalColumn,
    measure: Measure,
    aggregation: Aggregation,
) -> Vec<GroupAggregate> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (row, record) in derived.view().records().iter().enumerate() {
        let values = groups.entry(group.value(record)).or_default();
        if let Some(v) = derived.measure_value(row, measure) {
            values.push(v);
        }
    }

    tracing::debug!(%group, %measure, %aggregation, groups = groups.len(), "aggregated");
    groups
        .into_iter()
        .map(|(key, values)| GroupAggregate {
            group_key: key.to_owned(),
            value: aggregation.reduce(&values),
        })
        .collect()
}

/// Number of rows holding one distinct value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: f64,
    pub count: usize,
}

/// Counts each distinct finite value of `column`, ascending by value.
#[must_use]
pub fn frequency(view: &FilteredView, column: NumericColumn) -> Vec<ValueCount> {
    let mut values = view
        .column_values(column)
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);

    values
        .chunk_by(|a, b| a == b)
        .map(|chunk| ValueCount {
            value: chunk[0],
            count: chunk.len(),
        })
        .collect()
}
