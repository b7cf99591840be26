//! Immutable dataset handle and filtered views
//!
//! A [`Dataset`] is loaded once and shared by handle: cloning it clones an
//! `Arc`, never the rows. A [`FilteredView`] owns copies of the rows it
//! selected, so derived columns computed from it never alias the dataset.

use std::{collections::HashSet, sync::Arc};

use serde::Serialize;

use crate::record::{BatchRecord, CategoricalColumn, NumericColumn};

/// The full, read-only table of batch records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[BatchRecord]>,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<BatchRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if both handles point at the same loaded rows.
    #[must_use]
    pub fn same_source(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// Distinct values of a categorical column, in first-seen order.
    ///
    /// These are the only values a facet selection may take.
    #[must_use]
    pub fn distinct_values(&self, column: CategoricalColumn) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|record| column.value(record))
            .filter(|value| seen.insert(*value))
            .collect()
    }

    #[must_use]
    pub fn contains_value(&self, column: CategoricalColumn, value: &str) -> bool {
        self.records.iter().any(|record| column.value(record) == value)
    }
}

/// Rows of a [`Dataset`] that matched a facet filter, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilteredView {
    records: Vec<BatchRecord>,
}

impl FilteredView {
    #[must_use]
    pub fn new(records: Vec<BatchRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw values of a numeric column, row-aligned (missing cells stay `NaN`).
    pub fn column_values(&self, column: NumericColumn) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |record| column.value(record))
    }
}
