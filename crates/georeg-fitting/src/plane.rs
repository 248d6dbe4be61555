use georeg_geometry::PlaneGeneral3D;
use georeg_optim::LevenbergMarquardt;
use nalgebra::RealField;

use crate::codec::CodecPlaneGeneral3D;
use crate::refine::{refine, RefinedModel};
use crate::residual::PlaneToPointSignedDistance;
use crate::FitError;

/// Geometric plane fit minimizing the squared signed distances of the points to the plane.
///
/// The refined plane is returned with a unit normal, oriented like the initial plane.
#[derive(Debug, Clone, Default)]
pub struct FitPlaneToPoints {
    /// Solver configuration.
    pub optimizer: LevenbergMarquardt,
}

impl FitPlaneToPoints {
    /// Minimum number of points.
    pub const MINIMUM_POINTS: usize = 3;

    /// Create a fitter with an explicit solver configuration.
    pub fn new(optimizer: LevenbergMarquardt) -> Self {
        Self { optimizer }
    }

    /// Refine `initial` against `points`.
    ///
    /// # Errors
    ///
    /// * [`FitError::InsufficientPoints`] with fewer than [`Self::MINIMUM_POINTS`] points.
    /// * [`FitError::Degenerate`] if the initial or refined normal vector is zero.
    /// * [`FitError::Optim`] if the solver fails.
    pub fn fit<T: RealField + Copy>(
        &self,
        points: &[[T; 3]],
        initial: &PlaneGeneral3D<T>,
    ) -> Result<RefinedModel<PlaneGeneral3D<T>, T>, FitError> {
        if points.len() < Self::MINIMUM_POINTS {
            return Err(FitError::InsufficientPoints {
                required: Self::MINIMUM_POINTS,
                actual: points.len(),
            });
        }
        if initial.normal_norm() == T::zero() {
            return Err(FitError::Degenerate("initial plane has a zero normal".to_string()));
        }

        let function = PlaneToPointSignedDistance::new(points);
        let mut refined = refine(&self.optimizer, &CodecPlaneGeneral3D, &function, initial)?;

        if refined.model.normal_norm() == T::zero() {
            return Err(FitError::Degenerate("refined plane has a zero normal".to_string()));
        }
        refined.model = refined.model.normalized();
        Ok(refined)
    }
}
