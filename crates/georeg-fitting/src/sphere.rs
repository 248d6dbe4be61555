use georeg_geometry::{ops::euclidean_distance3, Sphere3D};
use georeg_linalg::covariance::mean;
use georeg_optim::LevenbergMarquardt;
use nalgebra::RealField;

use crate::codec::CodecSphere3D;
use crate::refine::{refine, RefinedModel};
use crate::residual::SphereToPointSignedDistance;
use crate::FitError;

/// Geometric sphere fit minimizing the squared signed distances of the points to the surface.
///
/// Example:
/// ```
/// use georeg_fitting::sphere::FitSphereToPoints;
/// use georeg_geometry::Sphere3D;
///
/// let sphere = Sphere3D::new(1.0, -2.0, 3.0, 2.5);
/// let points: Vec<[f64; 3]> = (0..30)
///     .map(|i| sphere.point_at(0.3 + i as f64 * 0.1, i as f64 * 0.7))
///     .collect();
///
/// let fitter = FitSphereToPoints::default();
/// let initial = fitter.initial_guess(&points)?;
/// let refined = fitter.fit(&points, &initial)?;
/// assert!((refined.model.radius - 2.5).abs() < 1e-6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FitSphereToPoints {
    /// Solver configuration.
    pub optimizer: LevenbergMarquardt,
}

impl FitSphereToPoints {
    /// Minimum number of points.
    pub const MINIMUM_POINTS: usize = 4;

    /// Create a fitter with an explicit solver configuration.
    pub fn new(optimizer: LevenbergMarquardt) -> Self {
        Self { optimizer }
    }

    /// Starting sphere centered on the centroid with the mean distance as radius.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InsufficientPoints`] if `points` is empty.
    pub fn initial_guess<T: RealField + Copy>(
        &self,
        points: &[[T; 3]],
    ) -> Result<Sphere3D<T>, FitError> {
        if points.is_empty() {
            return Err(FitError::InsufficientPoints {
                required: 1,
                actual: 0,
            });
        }

        let center = mean(points)?;
        let mut radius = T::zero();
        for p in points {
            radius += euclidean_distance3(&center, p);
        }
        let n: T = nalgebra::convert(points.len() as f64);
        radius /= n;

        Ok(Sphere3D { center, radius })
    }

    /// Refine `initial` against `points`.
    ///
    /// # Errors
    ///
    /// * [`FitError::InsufficientPoints`] with fewer than [`Self::MINIMUM_POINTS`] points.
    /// * [`FitError::Optim`] if the solver fails.
    pub fn fit<T: RealField + Copy>(
        &self,
        points: &[[T; 3]],
        initial: &Sphere3D<T>,
    ) -> Result<RefinedModel<Sphere3D<T>, T>, FitError> {
        if points.len() < Self::MINIMUM_POINTS {
            return Err(FitError::InsufficientPoints {
                required: Self::MINIMUM_POINTS,
                actual: points.len(),
            });
        }

        let function = SphereToPointSignedDistance::new(points);
        let mut refined = refine(&self.optimizer, &CodecSphere3D, &function, initial)?;

        // the residuals only see |r|
        refined.model.radius = refined.model.radius.abs();
        Ok(refined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_guess_of_symmetric_points() -> Result<(), FitError> {
        let points = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let guess = FitSphereToPoints::default().initial_guess(&points)?;
        assert_eq!(guess.center, [0.0, 0.0, 0.0]);
        assert_relative_eq!(guess.radius, 1.0);
        Ok(())
    }

    #[test]
    fn test_fit_from_perturbed_guess() -> Result<(), FitError> {
        let sphere = Sphere3D::new(0.5, 0.25, -1.0, 1.75);
        let points: Vec<[f64; 3]> = (0..40)
            .map(|i| sphere.point_at(0.1 + i as f64 * 0.075, i as f64 * 1.3))
            .collect();

        let initial = Sphere3D::new(0.2, 0.6, -1.4, 1.0);
        let refined = FitSphereToPoints::default().fit(&points, &initial)?;

        assert!(refined.final_cost < 1e-16);
        for i in 0..3 {
            assert_relative_eq!(refined.model.center[i], sphere.center[i], epsilon = 1e-6);
        }
        assert_relative_eq!(refined.model.radius, sphere.radius, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_too_few_points() {
        let points = [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let initial = Sphere3D::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(
            FitSphereToPoints::default().fit(&points, &initial),
            Err(FitError::InsufficientPoints {
                required: 4,
                actual: 3
            })
        );
    }
}
