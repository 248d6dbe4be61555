//! Rotation extraction from a cross-covariance matrix (Arun / Kabsch).
//!
//! Given `Sigma = U S V^T`, the rotation minimizing the squared distance between the centered
//! point sets is `R = V U^T`. When `det(R) < 0` the decomposition produced a reflection; the
//! column of `V` paired with the smallest singular value is negated once and `R` recomputed.
//! A second negative determinant is reported as [`LinalgError::ImproperRotation`].
//!
//! # References
//!
//! * Arun, K., Huang, T. S., and Blostein, S. D.
//!   "Least-squares fitting of two 3-D point sets." IEEE PAMI, 1987.

use nalgebra::{DMatrix, Matrix2, Matrix3, RealField, SMatrix, SVD};

use crate::{LinalgError, SvdParams};

/// Compute the proper rotation `R = V U^T` from the SVD of a cross-covariance matrix.
///
/// # Arguments
///
/// * `sigma` - Cross-covariance between source and destination points.
/// * `params` - Iteration limit of the decomposition.
///
/// # Returns
///
/// A rotation matrix with determinant `+1` mapping centered source points onto centered
/// destination points.
///
/// # Errors
///
/// * [`LinalgError::SvdNotConverged`] if `sigma` is not finite or the SVD fails to converge.
/// * [`LinalgError::ImproperRotation`] if the rotation is still a reflection after the
///   single correction.
pub fn rotation_from_cross_covariance<T: RealField + Copy, const D: usize>(
    sigma: &SMatrix<T, D, D>,
    params: &SvdParams,
) -> Result<SMatrix<T, D, D>, LinalgError> {
    if sigma.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::SvdNotConverged);
    }

    let m = DMatrix::from_fn(D, D, |r, c| sigma[(r, c)]);
    let svd = SVD::try_new(m, true, true, T::default_epsilon(), params.max_iterations)
        .ok_or(LinalgError::SvdNotConverged)?;

    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Err(LinalgError::SvdNotConverged);
    };

    let u_t = u.transpose();
    let mut v = v_t.transpose();
    let mut r = &v * &u_t;

    let mut det = r.determinant();
    if det < T::zero() {
        let last = smallest_index(svd.singular_values.as_slice());
        log::debug!("reflection in cross-covariance SVD, negating column {last} of V");

        for i in 0..D {
            v[(i, last)] = -v[(i, last)];
        }
        r = &v * &u_t;

        det = r.determinant();
        if det < T::zero() {
            return Err(LinalgError::ImproperRotation {
                determinant: nalgebra::try_convert(det).unwrap_or(f64::NAN),
            });
        }
    }

    if !det.is_finite() {
        return Err(LinalgError::SvdNotConverged);
    }

    Ok(SMatrix::from_fn(|i, j| r[(i, j)]))
}

/// 2D specialization of [`rotation_from_cross_covariance`].
pub fn rotation2<T: RealField + Copy>(
    sigma: &Matrix2<T>,
    params: &SvdParams,
) -> Result<Matrix2<T>, LinalgError> {
    rotation_from_cross_covariance(sigma, params)
}

/// 3D specialization of [`rotation_from_cross_covariance`].
pub fn rotation3<T: RealField + Copy>(
    sigma: &Matrix3<T>,
    params: &SvdParams,
) -> Result<Matrix3<T>, LinalgError> {
    rotation_from_cross_covariance(sigma, params)
}

// index of the smallest singular value; the last one when they come sorted
fn smallest_index<T: RealField + Copy>(values: &[T]) -> usize {
    let mut best = values.len().saturating_sub(1);
    for (i, &s) in values.iter().enumerate() {
        if s < values[best] {
            best = i;
        }
    }
    best
}
