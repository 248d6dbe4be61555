//! Rigid motion estimation from paired point sets.
//!
//! All fitters minimize the mean squared distance `(1/N) Σ ‖R src_i + t − dst_i‖²` over proper
//! rotations. They hold configuration only and can be shared across threads.

mod quaternion;
mod se2;
mod se3;

pub use quaternion::MotionSe3PointCrossCovariance;
pub use se2::MotionSe2PointSvd;
pub use se3::MotionSe3PointSvd;

use crate::FitError;

/// A rigid motion estimator from point correspondences.
///
/// `dst[i]` is the image of `src[i]` under the motion to be estimated.
pub trait MotionTransformPoint<T> {
    /// Point type of the correspondences.
    type Point;

    /// Estimated motion type.
    type Motion;

    /// Minimum number of correspondences accepted by [`MotionTransformPoint::fit`].
    const MINIMUM_POINTS: usize = 3;

    /// Estimate the motion mapping `src` onto `dst`.
    ///
    /// # Errors
    ///
    /// * [`FitError::MismatchedLengths`] if `src` and `dst` differ in length.
    /// * [`FitError::InsufficientPoints`] if fewer than [`MotionTransformPoint::MINIMUM_POINTS`]
    ///   correspondences are given.
    /// * [`FitError::Linalg`] if the rotation cannot be extracted.
    fn fit(&self, src: &[Self::Point], dst: &[Self::Point]) -> Result<Self::Motion, FitError>;
}

/// Validate a correspondence set: equal lengths first, then the minimum size.
pub(crate) fn check_correspondences<P>(
    src: &[P],
    dst: &[P],
    minimum: usize,
) -> Result<(), FitError> {
    if src.len() != dst.len() {
        return Err(FitError::MismatchedLengths {
            left: src.len(),
            right: dst.len(),
        });
    }
    if src.len() < minimum {
        return Err(FitError::InsufficientPoints {
            required: minimum,
            actual: src.len(),
        });
    }
    Ok(())
}
