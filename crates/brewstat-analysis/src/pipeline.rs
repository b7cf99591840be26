//! End-to-end analysis of one facet selection
//!
//! [`Pipeline::run`] takes the shared [`Dataset`] and a [`FacetFilter`] and
//! recomputes everything the dashboards show for that selection:
//!
//! ```text
//! Dataset --filter--> FilteredView --+--> summary
//!                                    +--> whiskers (grouped)
//!                                    +--> derive --> DerivedView --+--> SKU aggregations
//!                                    |                             +--> scatter series + curves
//!                                    +--> fermentation frequency
//! ```
//!
//! Every stage reads its input and returns a fresh value, so the report for
//! one selection never depends on an earlier run.

use brewstat_stats::whisker::DEFAULT_WHISKER_MULTIPLIER;
use serde::{Deserialize, Serialize};

use crate::{
    aggregate::{self, Aggregation, GroupAggregate, ValueCount},
    dataset::{Dataset, FilteredView},
    derived::DerivedView,
    facet::FacetFilter,
    loader::DEFAULT_ROW_LIMIT,
    regression::{DEFAULT_CURVE_SAMPLES, ScatterRelationship, ScatterSeries},
    record::{CategoricalColumn, Measure, NumericColumn},
    summary::{self, ColumnSummary},
    whisker::{self, WhiskerRecord},
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("whisker_multiplier must be a non-negative number, got {value}")]
    InvalidWhiskerMultiplier { value: f64 },
}

/// Tunables of the pipeline. Every field has a default, so a partial
/// configuration file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Whisker reach in multiples of the IQR.
    pub whisker_multiplier: f64,
    /// Points per sampled regression curve.
    pub curve_samples: usize,
    /// Maximum number of data rows read from the source.
    pub row_limit: Option<usize>,
    pub whisker_group: CategoricalColumn,
    pub whisker_value: NumericColumn,
    pub relationships: Vec<ScatterRelationship>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            whisker_multiplier: DEFAULT_WHISKER_MULTIPLIER,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            row_limit: Some(DEFAULT_ROW_LIMIT),
            whisker_group: CategoricalColumn::Location,
            whisker_value: NumericColumn::QualityScore,
            relationships: ScatterRelationship::defaults(),
        }
    }
}

impl PipelineConfig {
    /// Rejects values the pipeline would otherwise have to coerce.
    ///
    /// A negative or non-finite whisker multiplier is an error here;
    /// [`WhiskerStats`](brewstat_stats::whisker::WhiskerStats) itself treats
    /// it as zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let value = self.whisker_multiplier;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidWhiskerMultiplier { value });
        }
        Ok(())
    }
}

/// Per-SKU views of sales.
///
/// Both are sums per SKU; the ratio chart stacks one bar segment per batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuAggregations {
    pub total_sales: Vec<GroupAggregate>,
    pub total_sales_volume_ratio: Vec<GroupAggregate>,
}

/// Everything computed for one facet selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub selection: FacetFilter,
    pub rows: FilteredView,
    pub summary: Vec<ColumnSummary>,
    pub whiskers: Vec<WhiskerRecord>,
    /// Sales/volume ratio aligned with `rows`.
    pub sales_volume_ratio: Vec<Option<f64>>,
    pub sku: SkuAggregations,
    pub fermentation_time_frequency: Vec<ValueCount>,
    pub scatter: Vec<ScatterSeries>,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Like [`Pipeline::new`], but fails on an invalid configuration.
    pub fn try_new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage for `filter` over `dataset`.
    ///
    /// An empty selection is not an error: the report then holds empty
    /// tables and empty curves.
    #[must_use]
    pub fn run(&self, dataset: &Dataset, filter: &FacetFilter) -> PipelineReport {
        let config = &self.config;
        let view = filter.apply(dataset);
        if view.is_empty() {
            tracing::info!(selection = ?filter.selections(), "selection matched no rows");
        }

        let summary = summary::summarize(&view);
        let whiskers = whisker::group_whiskers(
            &view,
            config.whisker_group,
            config.whisker_value,
            config.whisker_multiplier,
        );
        tracing::debug!(groups = whiskers.len(), "computed whiskers");

        let derived = DerivedView::new(&view);
        let sku = SkuAggregations {
            total_sales: aggregate::aggregate_by(
                &derived,
                CategoricalColumn::Sku,
                NumericColumn::TotalSales.into(),
                Aggregation::Sum,
            ),
            total_sales_volume_ratio: aggregate::aggregate_by(
                &derived,
                CategoricalColumn::Sku,
                Measure::SalesVolumeRatio,
                Aggregation::Sum,
            ),
        };
        let fermentation_time_frequency = aggregate::frequency(&view, NumericColumn::FermentationTime);
        let scatter = config
            .relationships
            .iter()
            .map(|&relationship| ScatterSeries::compute(&derived, relationship, config.curve_samples))
            .collect();
        let sales_volume_ratio = derived.ratios().to_vec();

        PipelineReport {
            selection: filter.clone(),
            rows: view,
            summary,
            whiskers,
            sales_volume_ratio,
            sku,
            fermentation_time_frequency,
            scatter,
        }
    }
}
