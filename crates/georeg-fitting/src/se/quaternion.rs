use georeg_geometry::Se3;
use georeg_linalg::{covariance::cross_covariance, quaternion::rotation_from_quaternion, SvdParams};
use nalgebra::RealField;

use super::{check_correspondences, se3::compose_se3, MotionTransformPoint};
use crate::FitError;

/// Spatial rigid motion from point correspondences via the unit quaternion method.
///
/// Consumes the same cross-covariance as [`super::MotionSe3PointSvd`] but takes the rotation
/// from the dominant eigenvector of a symmetric 4x4 matrix, which is always a proper rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionSe3PointCrossCovariance {
    /// Iteration limit of the symmetric eigendecomposition.
    pub eigen: SvdParams,
}

impl MotionSe3PointCrossCovariance {
    /// Create a fitter with explicit decomposition parameters.
    pub fn new(eigen: SvdParams) -> Self {
        Self { eigen }
    }

    /// Estimate the motion mapping `src` onto `dst`.
    ///
    /// See [`MotionTransformPoint::fit`] for the error conditions.
    pub fn fit<T: RealField + Copy>(
        &self,
        src: &[[T; 3]],
        dst: &[[T; 3]],
    ) -> Result<Se3<T>, FitError> {
        check_correspondences(src, dst, <Self as MotionTransformPoint<T>>::MINIMUM_POINTS)?;

        let cov = cross_covariance(src, dst)?;
        let r = rotation_from_quaternion(&cov.sigma, &self.eigen)?;

        Ok(compose_se3(&r, &cov))
    }
}

impl<T: RealField + Copy> MotionTransformPoint<T> for MotionSe3PointCrossCovariance {
    type Point = [T; 3];
    type Motion = Se3<T>;

    fn fit(&self, src: &[[T; 3]], dst: &[[T; 3]]) -> Result<Se3<T>, FitError> {
        MotionSe3PointCrossCovariance::fit(self, src, dst)
    }
}
