//! Residual functions binding a model codec to a borrowed point set.

use georeg_geometry::{PlaneGeneral3D, Sphere3D};
use georeg_optim::{FunctionNtoM, OptimError};
use nalgebra::RealField;

use crate::codec::{CodecPlaneGeneral3D, CodecSphere3D, ModelCodec};

/// Signed distances from a sphere to each point: `‖p_i − c‖ − r`.
///
/// The parameters are the sphere encoded by [`CodecSphere3D`]. The points are borrowed for the
/// lifetime of the function so they cannot change between evaluations.
///
/// Example:
/// ```
/// use georeg_fitting::residual::SphereToPointSignedDistance;
/// use georeg_optim::FunctionNtoM;
///
/// let points = [[2.0, 0.0, 0.0], [0.0, 0.5, 0.0]];
/// let f = SphereToPointSignedDistance::new(&points);
/// let mut out = [0.0; 2];
/// f.process(&[0.0, 0.0, 0.0, 1.0], &mut out)?;
/// assert_eq!(out, [1.0, -0.5]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SphereToPointSignedDistance<'a, T> {
    points: &'a [[T; 3]],
}

impl<'a, T> SphereToPointSignedDistance<'a, T> {
    /// Bind the function to a point set.
    pub fn new(points: &'a [[T; 3]]) -> Self {
        Self { points }
    }

    /// The bound points.
    pub fn points(&self) -> &'a [[T; 3]] {
        self.points
    }
}

impl<T: RealField + Copy> FunctionNtoM<T> for SphereToPointSignedDistance<'_, T> {
    fn num_inputs(&self) -> usize {
        <CodecSphere3D as ModelCodec<T>>::PARAM_LENGTH
    }

    fn num_outputs(&self) -> usize {
        self.points.len()
    }

    fn process(&self, input: &[T], output: &mut [T]) -> Result<(), OptimError> {
        self.check_dimensions(input, output)?;
        let sphere: Sphere3D<T> = decode_checked(&CodecSphere3D, input)?;
        for (o, p) in output.iter_mut().zip(self.points.iter()) {
            *o = sphere.signed_distance(p);
        }
        Ok(())
    }
}

/// Signed distances from a plane to each point: `(A x + B y + C z + D) / ‖(A, B, C)‖`.
///
/// The parameters are the plane encoded by [`CodecPlaneGeneral3D`]. The residuals are invariant
/// to the scale of the parameters.
#[derive(Debug, Clone, Copy)]
pub struct PlaneToPointSignedDistance<'a, T> {
    points: &'a [[T; 3]],
}

impl<'a, T> PlaneToPointSignedDistance<'a, T> {
    /// Bind the function to a point set.
    pub fn new(points: &'a [[T; 3]]) -> Self {
        Self { points }
    }

    /// The bound points.
    pub fn points(&self) -> &'a [[T; 3]] {
        self.points
    }
}

impl<T: RealField + Copy> FunctionNtoM<T> for PlaneToPointSignedDistance<'_, T> {
    fn num_inputs(&self) -> usize {
        <CodecPlaneGeneral3D as ModelCodec<T>>::PARAM_LENGTH
    }

    fn num_outputs(&self) -> usize {
        self.points.len()
    }

    fn process(&self, input: &[T], output: &mut [T]) -> Result<(), OptimError> {
        self.check_dimensions(input, output)?;
        let plane: PlaneGeneral3D<T> = decode_checked(&CodecPlaneGeneral3D, input)?;
        for (o, p) in output.iter_mut().zip(self.points.iter()) {
            *o = plane.signed_distance(p);
        }
        Ok(())
    }
}

fn decode_checked<T: Copy, C: ModelCodec<T>>(codec: &C, input: &[T]) -> Result<C::Model, OptimError> {
    codec
        .decode(input)
        .map_err(|_| OptimError::DimensionMismatch {
            expected: C::PARAM_LENGTH,
            actual: input.len(),
        })
}
