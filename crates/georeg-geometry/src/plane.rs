use nalgebra::RealField;
use serde::{Deserialize, Serialize};

/// Plane in general form `A x + B y + C z + D = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneGeneral3D<T> {
    /// Coefficient of x.
    pub a: T,
    /// Coefficient of y.
    pub b: T,
    /// Coefficient of z.
    pub c: T,
    /// Constant term.
    pub d: T,
}

impl<T: RealField + Copy> PlaneGeneral3D<T> {
    /// Create a new plane.
    pub fn new(a: T, b: T, c: T, d: T) -> Self {
        Self { a, b, c, d }
    }

    /// Value of the implicit equation at `p`.
    pub fn evaluate(&self, p: &[T; 3]) -> T {
        self.a * p[0] + self.b * p[1] + self.c * p[2] + self.d
    }

    /// Norm of the normal vector `(A, B, C)`.
    pub fn normal_norm(&self) -> T {
        (self.a * self.a + self.b * self.b + self.c * self.c).sqrt()
    }

    /// Signed distance from the plane to `p`, positive on the side the normal points to.
    ///
    /// The result is not finite when the normal vector is zero.
    pub fn signed_distance(&self, p: &[T; 3]) -> T {
        self.evaluate(p) / self.normal_norm()
    }

    /// Same plane rescaled so that the normal has unit length.
    pub fn normalized(&self) -> Self {
        let n = self.normal_norm();
        Self::new(self.a / n, self.b / n, self.c / n, self.d / n)
    }
}
