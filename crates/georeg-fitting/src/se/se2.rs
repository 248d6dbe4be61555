use georeg_geometry::{ops::rotate2, Se2};
use georeg_linalg::{covariance::cross_covariance, rotation::rotation2, SvdParams};
use nalgebra::RealField;

use super::{check_correspondences, MotionTransformPoint};
use crate::FitError;

/// Planar rigid motion from point correspondences via cross-covariance and SVD.
///
/// Example:
/// ```
/// use georeg_fitting::se::MotionSe2PointSvd;
/// use georeg_geometry::Se2;
///
/// let motion = Se2::new(1.0, -2.0, 0.5);
/// let src = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [2.0, 3.0]];
/// let dst: Vec<[f64; 2]> = src.iter().map(|p| motion.transform_point(p)).collect();
///
/// let fitted = MotionSe2PointSvd::default().fit(&src, &dst)?;
/// assert!((fitted.yaw - 0.5).abs() < 1e-9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionSe2PointSvd {
    /// Parameters of the singular value decomposition.
    pub svd: SvdParams,
}

impl MotionSe2PointSvd {
    /// Create a fitter with explicit decomposition parameters.
    pub fn new(svd: SvdParams) -> Self {
        Self { svd }
    }

    /// Estimate the motion mapping `src` onto `dst`.
    ///
    /// See [`MotionTransformPoint::fit`] for the error conditions.
    pub fn fit<T: RealField + Copy>(
        &self,
        src: &[[T; 2]],
        dst: &[[T; 2]],
    ) -> Result<Se2<T>, FitError> {
        check_correspondences(src, dst, <Self as MotionTransformPoint<T>>::MINIMUM_POINTS)?;

        let cov = cross_covariance(src, dst)?;
        let r = rotation2(&cov.sigma, &self.svd)?;

        let yaw = r[(1, 0)].atan2(r[(0, 0)]);
        let rotated = rotate2(yaw, &cov.mean_src);

        Ok(Se2::new(
            cov.mean_dst[0] - rotated[0],
            cov.mean_dst[1] - rotated[1],
            yaw,
        ))
    }
}

impl<T: RealField + Copy> MotionTransformPoint<T> for MotionSe2PointSvd {
    type Point = [T; 2];
    type Motion = Se2<T>;

    fn fit(&self, src: &[[T; 2]], dst: &[[T; 2]]) -> Result<Se2<T>, FitError> {
        MotionSe2PointSvd::fit(self, src, dst)
    }
}
