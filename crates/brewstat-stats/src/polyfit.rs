//! Least-squares polynomial regression
//!
//! [`PolynomialFit`] fits `y = c0 + c1 x + ... + cd x^d` to a set of points by
//! solving the Vandermonde system with a singular value decomposition.
//!
//! The x values are rescaled to `[-1, 1]` before the matrix is built. High
//! degrees over wide ranges (degree 6 over bitterness values around 50 gives
//! `x^6 ≈ 10^10`) would otherwise leave the system badly conditioned. The
//! fitted polynomial is still reported in the raw monomial basis.
//!
//! A fit needs at least `degree + 1` distinct x values. Fewer points leave
//! the system under-determined and the fit fails with
//! [`FitError::Degenerate`] instead of returning an unstable curve.
//!
//! # Examples
//!
//! ```
//! use brewstat_stats::polyfit::PolynomialFit;
//!
//! let data = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
//! let fit = PolynomialFit::new(&data, 1).unwrap();
//! let coefficients = fit.coefficients();
//! assert!((coefficients[0] - 1.0).abs() < 1e-9);
//! assert!((coefficients[1] - 2.0).abs() < 1e-9);
//!
//! let curve = fit.sample(5);
//! assert_eq!(curve.first(), Some(&(0.0, 1.0)));
//! ```

use std::ops::RangeInclusive;

use nalgebra::{DMatrix, DVector, SVD};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("no finite points to fit")]
    NoData,
    #[display("cannot fit degree-{degree} polynomial with {points} distinct points")]
    Degenerate { degree: usize, points: usize },
    #[display("least-squares solve failed: {reason}")]
    Algebra {
        #[error(not(source))]
        reason: &'static str,
    },
}

/// A least-squares polynomial fitted to `(x, y)` points.
#[derive(Debug, Clone)]
pub struct PolynomialFit {
    degree: usize,
    point_count: usize,
    x_range: RangeInclusive<f64>,
    center: f64,
    half_width: f64,
    /// Coefficients over the rescaled variable, lowest power first.
    scaled_coefficients: Vec<f64>,
}

impl PolynomialFit {
    /// Fits a polynomial of the given degree to the points.
    ///
    /// Points with a non-finite coordinate are ignored.
    ///
    /// # Errors
    ///
    /// - [`FitError::NoData`]: no finite point remains.
    /// - [`FitError::Degenerate`]: fewer than `degree + 1` distinct x values,
    ///   or a rank-deficient system.
    /// - [`FitError::Algebra`]: the SVD solve failed or produced non-finite
    ///   coefficients.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(data: &[(f64, f64)], degree: usize) -> Result<Self, FitError> {
        let data = data
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect::<Vec<_>>();
        if data.is_empty() {
            return Err(FitError::NoData);
        }

        let distinct_x = count_distinct_x(&data);
        let k = degree + 1;
        if distinct_x < k {
            return Err(FitError::Degenerate {
                degree,
                points: distinct_x,
            });
        }

        let min_x = data.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
        let max_x = data
            .iter()
            .map(|&(x, _)| x)
            .fold(f64::NEG_INFINITY, f64::max);
        let center = f64::midpoint(min_x, max_x);
        let half_width = if max_x > min_x {
            (max_x - min_x) / 2.0
        } else {
            1.0
        };

        let n = data.len();
        let matrix = DMatrix::from_fn(n, k, |row, col| {
            let t = (data[row].0 - center) / half_width;
            t.powi(col as i32)
        });
        let b = DVector::from_iterator(n, data.iter().map(|&(_, y)| y));

        let decomp = SVD::new(matrix, true, true);

        // ~= machine_epsilon * max(size) * max_singular
        #[expect(clippy::cast_precision_loss)]
        let epsilon = f64::EPSILON * n.max(k) as f64 * decomp.singular_values.max();
        if decomp.rank(epsilon) < k {
            return Err(FitError::Degenerate {
                degree,
                points: distinct_x,
            });
        }

        let solution = decomp
            .solve(&b, epsilon)
            .map_err(|reason| FitError::Algebra { reason })?;
        let scaled_coefficients = solution.iter().copied().collect::<Vec<_>>();
        if scaled_coefficients.iter().any(|c| !c.is_finite()) {
            return Err(FitError::Algebra {
                reason: "non-finite coefficients",
            });
        }

        Ok(Self {
            degree,
            point_count: n,
            x_range: min_x..=max_x,
            center,
            half_width,
            scaled_coefficients,
        })
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of finite points the fit was computed from.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Observed x range of the fitted points.
    #[must_use]
    pub fn x_range(&self) -> RangeInclusive<f64> {
        self.x_range.clone()
    }

    /// Coefficients in the raw monomial basis, lowest power first.
    ///
    /// Expands `Σ a_k ((x - center) / half_width)^k` into `Σ c_j x^j`.
    #[must_use]
    pub fn coefficients(&self) -> Vec<f64> {
        let scale = 1.0 / self.half_width;
        let shift = -self.center / self.half_width;

        let mut coefficients = vec![0.0; self.degree + 1];
        // expansion of (scale * x + shift)^k, starting from k = 0
        let mut power = vec![1.0];
        for &a in &self.scaled_coefficients {
            for (c, p) in coefficients.iter_mut().zip(&power) {
                *c += a * p;
            }
            let mut next = vec![0.0; power.len() + 1];
            for (j, p) in power.iter().enumerate() {
                next[j] += shift * p;
                next[j + 1] += scale * p;
            }
            power = next;
        }
        coefficients
    }

    /// Evaluates the fitted polynomial at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let t = (x - self.center) / self.half_width;
        self.scaled_coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &a| acc.mul_add(t, a))
    }

    /// Samples the polynomial at `count` evenly spaced x values spanning the
    /// observed x range, endpoints included.
    ///
    /// A zero-width range yields a single point.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sample(&self, count: usize) -> Vec<(f64, f64)> {
        let (start, end) = (*self.x_range.start(), *self.x_range.end());
        if count == 0 {
            return vec![];
        }
        if count == 1 || end <= start {
            return vec![(start, self.evaluate(start))];
        }

        let step = (end - start) / (count - 1) as f64;
        (0..count)
            .map(|i| {
                let x = if i == count - 1 {
                    end
                } else {
                    start + step * i as f64
                };
                (x, self.evaluate(x))
            })
            .collect()
    }
}

fn count_distinct_x(data: &[(f64, f64)]) -> usize {
    let mut xs = data.iter().map(|&(x, _)| x).collect::<Vec<_>>();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_line_with_cubic_degree() {
        let data = (0..10)
            .map(|i| {
                let x = f64::from(i);
                (x, 2.0 * x + 1.0)
            })
            .collect::<Vec<_>>();
        let fit = PolynomialFit::new(&data, 3).unwrap();
        let c = fit.coefficients();
        assert_eq!(c.len(), 4);
        assert_close(c[0], 1.0, 1e-8);
        assert_close(c[1], 2.0, 1e-8);
        assert_close(c[2], 0.0, 1e-8);
        assert_close(c[3], 0.0, 1e-8);
    }

    #[test]
    fn test_exact_quadratic_off_origin() {
        let data = (0..12)
            .map(|i| {
                let x = 3.0 + 0.5 * f64::from(i);
                (x, 0.5 * x * x - 4.0 * x + 2.0)
            })
            .collect::<Vec<_>>();
        let fit = PolynomialFit::new(&data, 2).unwrap();
        let c = fit.coefficients();
        assert_close(c[0], 2.0, 1e-8);
        assert_close(c[1], -4.0, 1e-8);
        assert_close(c[2], 0.5, 1e-8);
        assert_close(fit.evaluate(5.0), 12.5 - 20.0 + 2.0, 1e-9);
    }

    #[test]
    fn test_high_degree_on_wide_range() {
        // sextic over a bitterness-like range
        let poly = |x: f64| 1e-8 * (x - 40.0).powi(6) - 0.01 * x + 3.0;
        let data = (0..60)
            .map(|i| {
                let x = 20.0 + f64::from(i) * (40.0 / 59.0);
                (x, poly(x))
            })
            .collect::<Vec<_>>();
        let fit = PolynomialFit::new(&data, 6).unwrap();
        for (x, y) in fit.sample(25) {
            assert_close(y, poly(x), 1e-6);
        }
    }

    #[test]
    fn test_least_squares_line_through_noise() {
        // symmetric residuals around y = x
        let data = [(0.0, 1.0), (0.0, -1.0), (2.0, 3.0), (2.0, 1.0)];
        let fit = PolynomialFit::new(&data, 1).unwrap();
        let c = fit.coefficients();
        assert_close(c[0], 0.0, 1e-12);
        assert_close(c[1], 1.0, 1e-12);
        assert_eq!(fit.point_count(), 4);
    }

    #[test]
    fn test_too_few_points_is_degenerate() {
        let data = [(1.0, 1.0), (2.0, 4.0), (3.0, 9.0)];
        assert_eq!(
            PolynomialFit::new(&data, 3).unwrap_err(),
            FitError::Degenerate {
                degree: 3,
                points: 3
            }
        );
    }

    #[test]
    fn test_repeated_x_counts_once() {
        let data = [(1.0, 1.0), (1.0, 2.0), (1.0, 3.0), (2.0, 4.0)];
        assert_eq!(
            PolynomialFit::new(&data, 2).unwrap_err(),
            FitError::Degenerate {
                degree: 2,
                points: 2
            }
        );
    }

    #[test]
    fn test_clustered_x_reports_distinct_points() {
        // six x values within 1e-12 of each other cannot support a sextic
        let data = (0..6)
            .map(|i| 1.0 + f64::from(i) * 1e-13)
            .chain(std::iter::repeat_n(100.0, 201))
            .map(|x| (x, x))
            .collect::<Vec<_>>();
        assert_eq!(
            PolynomialFit::new(&data, 6).unwrap_err(),
            FitError::Degenerate {
                degree: 6,
                points: 7
            }
        );
    }

    #[test]
    fn test_no_data() {
        assert_eq!(PolynomialFit::new(&[], 1).unwrap_err(), FitError::NoData);
        assert_eq!(
            PolynomialFit::new(&[(f64::NAN, 1.0), (2.0, f64::INFINITY)], 1).unwrap_err(),
            FitError::NoData
        );
    }

    #[test]
    fn test_degree_zero_is_mean() {
        let data = [(5.0, 2.0), (5.0, 4.0), (5.0, 9.0)];
        let fit = PolynomialFit::new(&data, 0).unwrap();
        assert_close(fit.coefficients()[0], 5.0, 1e-12);
        let curve = fit.sample(100);
        assert_eq!(curve.len(), 1);
        assert_close(curve[0].1, 5.0, 1e-12);
    }

    #[test]
    fn test_sample_spans_range() {
        let data = [(1.0, 0.0), (2.0, 1.0), (4.0, 3.0)];
        let fit = PolynomialFit::new(&data, 1).unwrap();
        let curve = fit.sample(100);
        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0].0, 1.0);
        assert_eq!(curve[99].0, 4.0);
        assert!(curve.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(fit.sample(0).is_empty());
    }
}
