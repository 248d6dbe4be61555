use nalgebra::RealField;
use serde::{Deserialize, Serialize};

use crate::ops::euclidean_distance3;

/// Sphere in 3D described by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sphere3D<T> {
    /// Center of the sphere.
    pub center: [T; 3],
    /// Radius of the sphere.
    pub radius: T,
}

impl<T: RealField + Copy> Sphere3D<T> {
    /// Create a new sphere.
    pub fn new(x: T, y: T, z: T, radius: T) -> Self {
        Self {
            center: [x, y, z],
            radius,
        }
    }

    /// Signed distance from the surface to `p`: positive outside, negative inside.
    pub fn signed_distance(&self, p: &[T; 3]) -> T {
        euclidean_distance3(&self.center, p) - self.radius
    }

    /// Point on the surface at polar angle `theta` and azimuth `phi`.
    pub fn point_at(&self, theta: T, phi: T) -> [T; 3] {
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        [
            self.center[0] + self.radius * st * cp,
            self.center[1] + self.radius * st * sp,
            self.center[2] + self.radius * ct,
        ]
    }
}
