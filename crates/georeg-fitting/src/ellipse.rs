//! Weighted algebraic ellipse fitting.
//!
//! Each point contributes the row `sqrt(w_i) · [x², xy, y², x, y, 1]` to a design matrix `D`, so
//! that `DᵀD = Σ w_i r_i r_iᵀ` is the weighted scatter of the monomials. The conic minimizing
//! `Σ w_i (a x² + b xy + c y² + d x + e y + f)²` under a unit norm constraint is the right
//! singular vector of `D` belonging to its smallest singular value.

use georeg_geometry::EllipseQuadratic;
use georeg_linalg::{LinalgError, SvdParams};
use nalgebra::{DMatrix, RealField, SVD};

use crate::FitError;

/// Parameters of [`FitEllipseWeightedAlgebraic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EllipseFitParams {
    /// Parameters of the singular value decomposition.
    pub svd: SvdParams,
}

/// Weighted algebraic fit of a conic to 2D points.
///
/// The result is defined up to scale. A weight of zero removes the point from the fit.
///
/// Example:
/// ```
/// use georeg_fitting::ellipse::FitEllipseWeightedAlgebraic;
/// use georeg_geometry::EllipseRotated;
///
/// let ellipse = EllipseRotated::new(0.0, 0.0, 3.0, 1.5, 0.0);
/// let points: Vec<[f64; 2]> = (0..20)
///     .map(|i| ellipse.point_at(i as f64 * std::f64::consts::TAU / 20.0))
///     .collect();
/// let weights = vec![1.0; points.len()];
///
/// let conic = FitEllipseWeightedAlgebraic::default().fit(&points, &weights)?;
/// let expected = ellipse.to_quadratic().normalized_by_f();
/// assert!((conic.normalized_by_f().a - expected.a).abs() < 1e-8);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitEllipseWeightedAlgebraic {
    /// Fit parameters.
    pub params: EllipseFitParams,
}

impl FitEllipseWeightedAlgebraic {
    /// Minimum number of points.
    pub const MINIMUM_POINTS: usize = 6;

    /// Minimum number of points with a positive weight.
    pub const MINIMUM_WEIGHTED_POINTS: usize = 5;

    /// Create a fitter with explicit parameters.
    pub fn new(params: EllipseFitParams) -> Self {
        Self { params }
    }

    /// Fit a conic to `points` weighted by `weights`.
    ///
    /// # Errors
    ///
    /// Input validation happens before any numeric work:
    /// * [`FitError::MismatchedLengths`] if `points` and `weights` differ in length.
    /// * [`FitError::InsufficientPoints`] with fewer than 6 points, or fewer than 5 points with a
    ///   positive weight.
    /// * [`FitError::InvalidWeight`] for a negative or non-finite weight.
    ///
    /// The fit itself fails with [`FitError::Degenerate`] when the weighted points do not
    /// determine a unique conic (e.g. collinear points), and with [`FitError::Linalg`] when the
    /// decomposition does not converge.
    pub fn fit<T: RealField + Copy>(
        &self,
        points: &[[T; 2]],
        weights: &[T],
    ) -> Result<EllipseQuadratic<T>, FitError> {
        Self::validate(points, weights)?;

        let n = points.len();
        let mut design = DMatrix::<T>::zeros(n, 6);
        for (i, (&[x, y], &w)) in points.iter().zip(weights.iter()).enumerate() {
            if w == T::zero() {
                continue;
            }
            let s = w.sqrt();
            let row = [x * x, x * y, y * y, x, y, T::one()];
            for (j, v) in row.into_iter().enumerate() {
                design[(i, j)] = s * v;
            }
        }

        let svd = SVD::try_new(
            design,
            false,
            true,
            T::default_epsilon(),
            self.params.svd.max_iterations,
        )
        .ok_or(LinalgError::SvdNotConverged)?;

        let singular_values = svd.singular_values.as_slice();
        if singular_values.iter().any(|s| !s.is_finite()) {
            return Err(LinalgError::SvdNotConverged.into());
        }
        let v_t = svd.v_t.ok_or(LinalgError::SvdNotConverged)?;

        let (smallest, second) = two_smallest(singular_values);
        let largest = singular_values
            .iter()
            .fold(T::zero(), |acc, &s| if s > acc { s } else { acc });

        let rows: T = nalgebra::convert(n.max(6) as f64);
        let threshold = largest * rows * T::default_epsilon();
        log::debug!(
            "ellipse fit: smallest singular values {:?} {:?}, threshold {:?}",
            singular_values[smallest],
            singular_values[second],
            threshold
        );
        if singular_values[second] < threshold {
            return Err(FitError::Degenerate(
                "weighted design matrix has a null space of dimension > 1".to_string(),
            ));
        }

        let v = v_t.row(smallest);
        Ok(EllipseQuadratic::new(v[0], v[1], v[2], v[3], v[4], v[5]))
    }

    fn validate<T: RealField + Copy>(points: &[[T; 2]], weights: &[T]) -> Result<(), FitError> {
        if points.len() != weights.len() {
            return Err(FitError::MismatchedLengths {
                left: points.len(),
                right: weights.len(),
            });
        }
        if points.len() < Self::MINIMUM_POINTS {
            return Err(FitError::InsufficientPoints {
                required: Self::MINIMUM_POINTS,
                actual: points.len(),
            });
        }

        let mut positive = 0;
        for (index, &w) in weights.iter().enumerate() {
            if !w.is_finite() || w < T::zero() {
                return Err(FitError::InvalidWeight { index });
            }
            if w > T::zero() {
                positive += 1;
            }
        }
        if positive < Self::MINIMUM_WEIGHTED_POINTS {
            return Err(FitError::InsufficientPoints {
                required: Self::MINIMUM_WEIGHTED_POINTS,
                actual: positive,
            });
        }
        Ok(())
    }
}

// indices of the smallest and second smallest values
fn two_smallest<T: RealField + Copy>(values: &[T]) -> (usize, usize) {
    let mut smallest = 0;
    for (i, &v) in values.iter().enumerate() {
        if v < values[smallest] {
            smallest = i;
        }
    }

    let mut second = if smallest == 0 { 1 } else { 0 };
    for (i, &v) in values.iter().enumerate() {
        if i != smallest && v < values[second] {
            second = i;
        }
    }
    (smallest, second)
}
