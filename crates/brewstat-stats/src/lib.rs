//! Statistical primitives for the brewery batch analysis pipeline.
//!
//! This crate provides the numeric building blocks used by `brewstat-analysis`:
//!
//! - **Percentiles**: Linear-interpolation quantiles over sorted data
//! - **Descriptive statistics**: Count, mean, median, sample variance and standard deviation
//! - **Summary statistics**: Count/mean/std/min/quartiles/max of a column
//! - **Whisker statistics**: Box-plot quartiles and whiskers clipped to the observed range
//! - **Polynomial regression**: Least-squares fits and sampled curves
//!
//! Every entry point ignores non-finite values, which is how missing cells
//! are represented upstream.
//!
//! # Modules
//!
//! - [`percentiles`]: Percentile computation and storage
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`summary`]: Column summaries for tabular display
//! - [`whisker`]: Box-plot whisker bounds
//! - [`polyfit`]: Polynomial least-squares fitting
//!
//! # Examples
//!
//! ## Computing percentiles
//!
//! ```
//! use brewstat_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(50.0), Some(3.0));
//! ```
//!
//! ## Computing whiskers
//!
//! ```
//! use brewstat_stats::whisker::WhiskerStats;
//!
//! let stats = WhiskerStats::new([1.0, 2.0, 3.0, 4.0, 100.0], 1.5).unwrap();
//! assert_eq!(stats.upper_whisker, 7.0);
//! ```
//!
//! ## Fitting a curve
//!
//! ```
//! use brewstat_stats::polyfit::PolynomialFit;
//!
//! let data = [(0.0, 0.0), (1.0, 1.0), (2.0, 4.0), (3.0, 9.0)];
//! let fit = PolynomialFit::new(&data, 2).unwrap();
//! assert!((fit.evaluate(4.0) - 16.0).abs() < 1e-9);
//! ```

pub mod descriptive;
pub mod percentiles;
pub mod polyfit;
pub mod summary;
pub mod whisker;
