use georeg_geometry::Se3;
use georeg_linalg::{
    covariance::{cross_covariance, CrossCovariance3},
    rotation::rotation3,
    SvdParams,
};
use nalgebra::{Matrix3, RealField};

use super::{check_correspondences, MotionTransformPoint};
use crate::FitError;

/// Spatial rigid motion from point correspondences via cross-covariance and SVD.
///
/// Example:
/// ```
/// use georeg_fitting::se::MotionSe3PointSvd;
/// use georeg_geometry::Se3;
///
/// let motion = Se3::from_euler_xyz(0.1, -0.4, 1.2, [1.0, 2.0, 3.0]);
/// let src = [
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, 0.0, 1.0],
/// ];
/// let dst: Vec<[f64; 3]> = src.iter().map(|p| motion.transform_point(p)).collect();
///
/// let fitted = MotionSe3PointSvd::default().fit(&src, &dst)?;
/// assert!((fitted.translation[2] - 3.0).abs() < 1e-9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionSe3PointSvd {
    /// Parameters of the singular value decomposition.
    pub svd: SvdParams,
}

impl MotionSe3PointSvd {
    /// Create a fitter with explicit decomposition parameters.
    pub fn new(svd: SvdParams) -> Self {
        Self { svd }
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
        let r = rotation3(&cov.sigma, &self.svd)?;

        Ok(compose_se3(&r, &cov))
    }
}

impl<T: RealField + Copy> MotionTransformPoint<T> for MotionSe3PointSvd {
    type Point = [T; 3];
    type Motion = Se3<T>;

    fn fit(&self, src: &[[T; 3]], dst: &[[T; 3]]) -> Result<Se3<T>, FitError> {
        MotionSe3PointSvd::fit(self, src, dst)
    }
}

/// Build the motion from its rotation: `t = mean_dst - R * mean_src`.
pub(super) fn compose_se3<T: RealField + Copy>(
    r: &Matrix3<T>,
    cov: &CrossCovariance3<T>,
) -> Se3<T> {
    let mut rotation = [[T::zero(); 3]; 3];
    for (i, row) in rotation.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = r[(i, j)];
        }
    }

    let mut translation = cov.mean_dst;
    for (i, t) in translation.iter_mut().enumerate() {
        for j in 0..3 {
            *t -= rotation[i][j] * cov.mean_src[j];
        }
    }

    Se3::new(rotation, translation)
}
