//! Closed-form rotation from the cross-covariance using unit quaternions.
//!
//! The optimal rotation is the unit eigenvector of the largest eigenvalue of the symmetric 4x4
//! matrix built from `Sigma`. Unlike the SVD formulation it can never produce a reflection.
//!
//! # References
//!
//! * Besl, P. J. and McKay, N. D. "A method for registration of 3-D shapes." IEEE PAMI, 1992.
//! * Horn, B. K. P. "Closed-form solution of absolute orientation using unit quaternions."
//!   JOSA A, 1987.

use nalgebra::{Matrix3, Matrix4, Quaternion, RealField, SymmetricEigen, UnitQuaternion};

use crate::{LinalgError, SvdParams};

/// Build the symmetric 4x4 matrix `Q(Sigma)` whose dominant eigenvector is the rotation.
pub fn quaternion_matrix<T: RealField + Copy>(sigma: &Matrix3<T>) -> Matrix4<T> {
    let trace = sigma.trace();
    let anti = sigma - sigma.transpose();
    let delta = [anti[(1, 2)], anti[(2, 0)], anti[(0, 1)]];
    let sym = sigma + sigma.transpose() - Matrix3::identity() * trace;

    let mut q = Matrix4::zeros();
    q[(0, 0)] = trace;
    for i in 0..3 {
        q[(0, i + 1)] = delta[i];
        q[(i + 1, 0)] = delta[i];
        for j in 0..3 {
            q[(i + 1, j + 1)] = sym[(i, j)];
        }
    }
    q
}

/// Compute the rotation aligning the source onto the destination from their cross-covariance.
///
/// # Errors
///
/// * [`LinalgError::SvdNotConverged`] if `sigma` contains non-finite values.
/// * [`LinalgError::EigenNotConverged`] if the symmetric eigendecomposition fails.
pub fn rotation_from_quaternion<T: RealField + Copy>(
    sigma: &Matrix3<T>,
    params: &SvdParams,
) -> Result<Matrix3<T>, LinalgError> {
    if sigma.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::SvdNotConverged);
    }

    let q = quaternion_matrix(sigma);
    let eig = SymmetricEigen::try_new(q, T::default_epsilon(), params.max_iterations)
        .ok_or(LinalgError::EigenNotConverged)?;

    let mut best = 0;
    for i in 1..4 {
        if eig.eigenvalues[i] > eig.eigenvalues[best] {
            best = i;
        }
    }

    let v = eig.eigenvectors.column(best);
    let quat = UnitQuaternion::from_quaternion(Quaternion::new(v[0], v[1], v[2], v[3]));

    Ok(quat.to_rotation_matrix().into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covariance::cross_covariance;
    use crate::rotation::rotation3;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_quaternion_matrix_is_symmetric() {
        let sigma = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0);
        let q = quaternion_matrix(&sigma);
        assert_relative_eq!(q, q.transpose());
        assert_relative_eq!(q.trace(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quaternion_agrees_with_svd() -> Result<(), LinalgError> {
        let mut rng = StdRng::seed_from_u64(434324);
        let axis = nalgebra::Vector3::new(0.3, -1.0, 0.4);
        let expected = nalgebra::Rotation3::from_axis_angle(
            &nalgebra::Unit::new_normalize(axis),
            2.1,
        )
        .into_inner();

        let src: Vec<[f64; 3]> = (0..30)
            .map(|_| {
                [
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                ]
            })
            .collect();
        let dst: Vec<[f64; 3]> = src
            .iter()
            .map(|p| {
                let q = expected * nalgebra::Vector3::new(p[0], p[1], p[2]);
                [q.x + 5.0, q.y + 10.0, q.z - 6.0]
            })
            .collect();

        let cov = cross_covariance(&src, &dst)?;
        let r_quat = rotation_from_quaternion(&cov.sigma, &SvdParams::default())?;
        let r_svd = rotation3(&cov.sigma, &SvdParams::default())?;

        assert_relative_eq!(r_quat, expected, epsilon = 1e-8);
        assert_relative_eq!(r_quat, r_svd, epsilon = 1e-8);
        Ok(())
    }
}
