//! Polynomial trend curves for scatter relationships
//!
//! A scatter relationship plots one [`Measure`] against another over a
//! [`DerivedView`] and overlays a least-squares polynomial of a configured
//! degree. Rows where either measure is undefined are dropped before fitting,
//! so a batch with zero volume never contributes to a curve that uses the
//! sales/volume ratio.
//!
//! # Failure Modes
//!
//! - No defined pair: the curve is empty. Nothing is plotted, and this is
//!   not an error.
//! - Fewer distinct x values than `degree + 1`: [`fit_curve`] returns
//!   [`FitError::Degenerate`]. [`ScatterSeries::compute`] records it as
//!   [`FitOutcome::Degenerate`] and keeps the scatter points, so callers can
//!   still draw the data.

use brewstat_stats::polyfit::{FitError, PolynomialFit};
use serde::{Deserialize, Serialize};

use crate::{
    derived::DerivedView,
    record::{Measure, NumericColumn},
};

/// Number of points a curve is sampled at unless configured otherwise.
pub const DEFAULT_CURVE_SAMPLES: usize = 100;

/// A fitted polynomial sampled across the observed x range.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegressionCurve {
    /// Raw-basis coefficients, lowest power first. Empty when nothing was fitted.
    pub coefficients: Vec<f64>,
    /// Sampled `(x, y)` points in ascending x.
    pub points: Vec<(f64, f64)>,
}

impl RegressionCurve {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Fits a degree-`degree` polynomial of `y` on `x` and samples it at
/// `samples` evenly spaced x values.
///
/// # Examples
///
/// ```
/// use brewstat_analysis::{
///     dataset::FilteredView,
///     derived::DerivedView,
///     record::{BatchRecord, Measure, NumericColumn},
///     regression,
/// };
///
/// let view = FilteredView::new(
///     (0..8)
///         .map(|i| BatchRecord {
///             alcohol_content: f64::from(i),
///             total_sales: 3.0 * f64::from(i) + 2.0,
///             ..Default::default()
///         })
///         .collect(),
/// );
/// let derived = DerivedView::new(&view);
/// let curve = regression::fit_curve(
///     &derived,
///     NumericColumn::AlcoholContent.into(),
///     NumericColumn::TotalSales.into(),
///     1,
///     5,
/// )
/// .unwrap();
/// assert_eq!(curve.points.len(), 5);
/// assert!((curve.coefficients[1] - 3.0).abs() < 1e-9);
/// ```
pub fn fit_curve(
    derived: &DerivedView<'_>,
    x: Measure,
    y: Measure,
    degree: usize,
    samples: usize,
) -> Result<RegressionCurve, FitError> {
    fit_pairs(&derived.defined_pairs(x, y), x, y, degree, samples)
}

fn fit_pairs(
    pairs: &[(f64, f64)],
    x: Measure,
    y: Measure,
    degree: usize,
    samples: usize,
) -> Result<RegressionCurve, FitError> {
    match PolynomialFit::new(pairs, degree) {
        Ok(fit) => {
            tracing::debug!(%x, %y, degree, points = fit.point_count(), "fitted regression curve");
            Ok(RegressionCurve {
                coefficients: fit.coefficients(),
                points: fit.sample(samples),
            })
        }
        Err(FitError::NoData) => {
            tracing::debug!(%x, %y, "no defined pairs to fit");
            Ok(RegressionCurve::default())
        }
        Err(err) => {
            tracing::warn!(%x, %y, degree, "{err}");
            Err(err)
        }
    }
}

/// Which measures to plot against each other and the trend degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterRelationship {
    pub x: Measure,
    pub y: Measure,
    pub degree: usize,
}

impl ScatterRelationship {
    #[must_use]
    pub fn new(x: impl Into<Measure>, y: impl Into<Measure>, degree: usize) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            degree,
        }
    }

    /// The three relationships of the standard report.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(NumericColumn::Bitterness, Measure::SalesVolumeRatio, 6),
            Self::new(NumericColumn::AlcoholContent, NumericColumn::TotalSales, 3),
            Self::new(NumericColumn::FermentationTime, NumericColumn::AlcoholContent, 3),
        ]
    }
}

/// Result of fitting one scatter relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitOutcome {
    Curve(RegressionCurve),
    Degenerate { degree: usize, points: usize },
    Failed { reason: String },
}

/// Scatter points, axis domains and fitted trend of one relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub x: Measure,
    pub y: Measure,
    pub degree: usize,
    pub points: Vec<(f64, f64)>,
    /// `(min, max)` of the plotted x values; `None` without points.
    pub x_domain: Option<(f64, f64)>,
    pub y_domain: Option<(f64, f64)>,
    pub fit: FitOutcome,
}

impl ScatterSeries {
    #[must_use]
    pub fn compute(
        derived: &DerivedView<'_>,
        relationship: ScatterRelationship,
        samples: usize,
    ) -> Self {
        let ScatterRelationship { x, y, degree } = relationship;
        let points = derived.defined_pairs(x, y);
        let fit = match fit_pairs(&points, x, y, degree, samples) {
            Ok(curve) => FitOutcome::Curve(curve),
            Err(FitError::Degenerate { degree, points }) => FitOutcome::Degenerate { degree, points },
            Err(err) => FitOutcome::Failed {
                reason: err.to_string(),
            },
        };

        Self {
            x,
            y,
            degree,
            x_domain: domain(points.iter().map(|&(x, _)| x)),
            y_domain: domain(points.iter().map(|&(_, y)| y)),
            points,
            fit,
        }
    }
}

fn domain<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
    })
}
