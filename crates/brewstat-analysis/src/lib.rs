//! Brewery batch analysis: loading, facet filtering and derived statistics
//!
//! This crate turns the brewery production CSV into the tables and curves the
//! dashboards display for one beer style and location.
//!
//! # Overview
//!
//! ## Loading
//!
//! 1. **Read the CSV** ([`loader::load_from_path`]): Validate headers, parse rows into
//!    [`record::BatchRecord`]s, stop at the row limit
//! 2. **Share the result** ([`dataset::Dataset`]): An immutable handle, cheap to clone
//! 3. **Memoize** ([`loader::DatasetCache`]): Reuse loads keyed by path and row limit
//!
//! ## Per-Selection Analysis
//!
//! 1. **Filter** ([`facet::FacetFilter`]): Keep the rows matching every facet selection
//! 2. **Summarize** ([`summary`]): Count, mean, std, quartiles and extrema per numeric column
//! 3. **Group** ([`whisker`]): Box-plot quartiles and whiskers per group
//! 4. **Derive** ([`derived::DerivedView`]): Sales/volume ratio per row
//! 5. **Aggregate** ([`aggregate`]): Per-SKU sums and means, value frequencies
//! 6. **Regress** ([`regression`]): Scatter points with a polynomial trend curve
//!
//! [`pipeline::Pipeline`] runs all of these for one selection and collects the
//! results in a serializable [`pipeline::PipelineReport`].
//!
//! # Missing Values
//!
//! Empty numeric cells load as `NaN`, and the sales/volume ratio is `None`
//! when the volume is zero or missing. Every computation skips such values;
//! none of them fails because of one.
//!
//! # Examples
//!
//! ```no_run
//! use brewstat_analysis::{
//!     facet::FacetFilter,
//!     loader::{DEFAULT_ROW_LIMIT, DatasetCache},
//!     pipeline::{Pipeline, PipelineConfig},
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let mut cache = DatasetCache::new();
//! let dataset = cache.get_or_load("brewery_data.csv", Some(DEFAULT_ROW_LIMIT))?;
//!
//! let filter = FacetFilter::style_and_location("Stout", "Whitefield");
//! filter.validate(&dataset)?;
//!
//! let report = Pipeline::new(PipelineConfig::default()).run(&dataset, &filter);
//! for whisker in &report.whiskers {
//!     println!(
//!         "{}: {:.2}..{:.2}",
//!         whisker.group_key, whisker.stats.lower_whisker, whisker.stats.upper_whisker
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod dataset;
pub mod derived;
pub mod facet;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod regression;
pub mod summary;
pub mod whisker;
