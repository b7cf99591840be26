//! Facet filtering
//!
//! A [`FacetFilter`] keeps the rows whose categorical columns equal every
//! selected value (logical AND, exact and case-sensitive). The application
//! filters on two facets, beer style and location; see
//! [`FacetFilter::style_and_location`].
//!
//! Filtering never fails. A selection that matches nothing yields an empty
//! [`FilteredView`], and every downstream computation accepts that.
//!
//! # Examples
//!
//! ```
//! use brewstat_analysis::{
//!     dataset::Dataset,
//!     facet::FacetFilter,
//!     record::BatchRecord,
//! };
//!
//! let dataset = Dataset::new(vec![
//!     BatchRecord { beer_style: "IPA".into(), location: "A".into(), ..Default::default() },
//!     BatchRecord { beer_style: "IPA".into(), location: "B".into(), ..Default::default() },
//! ]);
//!
//! let view = FacetFilter::style_and_location("IPA", "A").apply(&dataset);
//! assert_eq!(view.len(), 1);
//! ```

use serde::Serialize;

use crate::{
    dataset::{Dataset, FilteredView},
    record::{BatchRecord, CategoricalColumn},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FacetError {
    #[display("'{value}' is not a value of column {column}")]
    UnknownValue {
        column: CategoricalColumn,
        value: String,
    },
}

/// One `column == value` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetSelection {
    pub column: CategoricalColumn,
    pub value: String,
}

impl FacetSelection {
    #[must_use]
    pub fn new(column: CategoricalColumn, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, record: &BatchRecord) -> bool {
        self.column.value(record) == self.value
    }
}

/// Conjunction of facet selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetFilter {
    selections: Vec<FacetSelection>,
}

impl FacetFilter {
    #[must_use]
    pub fn new(selections: Vec<FacetSelection>) -> Self {
        Self { selections }
    }

    #[must_use]
    pub fn style_and_location(style: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(vec![
            FacetSelection::new(CategoricalColumn::BeerStyle, style),
            FacetSelection::new(CategoricalColumn::Location, location),
        ])
    }

    #[must_use]
    pub fn selections(&self) -> &[FacetSelection] {
        &self.selections
    }

    #[must_use]
    pub fn matches(&self, record: &BatchRecord) -> bool {
        self.selections.iter().all(|s| s.matches(record))
    }

    /// Copies the matching rows out of the dataset, preserving their order.
    #[must_use]
    pub fn apply(&self, dataset: &Dataset) -> FilteredView {
        let records = dataset
            .records()
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect::<Vec<_>>();
        tracing::debug!(
            matched = records.len(),
            total = dataset.len(),
            "facet filter applied"
        );
        FilteredView::new(records)
    }

    /// Checks that every selected value occurs in its column.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), FacetError> {
        for selection in &self.selections {
            if !dataset.contains_value(selection.column, &selection.value) {
                return Err(FacetError::UnknownValue {
                    column: selection.column,
                    value: selection.value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn record(style: &str, location: &str, quality: f64) -> BatchRecord {
        BatchRecord {
            beer_style: style.to_owned(),
            location: location.to_owned(),
            quality_score: quality,
            ..BatchRecord::default()
        }
    }

    #[test]
    fn test_both_predicates_must_hold() {
        let dataset = Dataset::new(vec![
            record("IPA", "A", 10.0),
            record("IPA", "B", 11.0),
            record("Stout", "A", 12.0),
            record("IPA", "A", 20.0),
            record("Lager", "C", 13.0),
        ]);
        let view = FacetFilter::style_and_location("IPA", "A").apply(&dataset);
        let scores = view.records().iter().map(|r| r.quality_score).collect::<Vec<_>>();
        assert_eq!(scores, vec![10.0, 20.0]);
    }

    #[test]
    fn test_case_sensitive_and_empty() {
        let dataset = Dataset::new(vec![record("IPA", "A", 10.0)]);
        let view = FacetFilter::style_and_location("ipa", "A").apply(&dataset);
        assert!(view.is_empty());
        let view = FacetFilter::style_and_location("IPA", "B").apply(&dataset);
        assert!(view.is_empty());
    }

    #[test]
    fn test_view_is_independent_of_dataset() {
        let dataset = Dataset::new(vec![record("IPA", "A", 10.0)]);
        let view = FacetFilter::style_and_location("IPA", "A").apply(&dataset);
        drop(dataset);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].quality_score, 10.0);
    }

    #[test]
    fn test_validate_reports_unknown_value() {
        let dataset = Dataset::new(vec![record("IPA", "A", 10.0)]);
        assert_eq!(
            FacetFilter::style_and_location("IPA", "A").validate(&dataset),
            Ok(())
        );
        assert_eq!(
            FacetFilter::style_and_location("IPA", "Z").validate(&dataset),
            Err(FacetError::UnknownValue {
                column: CategoricalColumn::Location,
                value: "Z".to_owned(),
            })
        );
    }

    #[test]
    fn test_random_datasets_keep_order_and_predicates() {
        let styles = ["IPA", "Stout", "Lager"];
        let locations = ["A", "B", "C", "D"];
        let mut rng = Pcg32::seed_from_u64(17);

        for _ in 0..50 {
            let len: u32 = rng.random_range(0..60);
            let records = (0..len)
                .map(|i| {
                    record(
                        styles.choose(&mut rng).unwrap(),
                        locations.choose(&mut rng).unwrap(),
                        f64::from(i),
                    )
                })
                .collect::<Vec<_>>();
            let dataset = Dataset::new(records);
            let filter = FacetFilter::style_and_location(
                *styles.choose(&mut rng).unwrap(),
                *locations.choose(&mut rng).unwrap(),
            );
            let view = filter.apply(&dataset);

            assert!(view.records().iter().all(|r| filter.matches(r)));
            // quality_score holds the source index, so it must strictly increase
            assert!(
                view.records()
                    .windows(2)
                    .all(|w| w[0].quality_score < w[1].quality_score)
            );
            let expected = dataset.records().iter().filter(|r| filter.matches(r)).count();
            assert_eq!(view.len(), expected);
        }
    }
}
