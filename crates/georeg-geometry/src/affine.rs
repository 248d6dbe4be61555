use nalgebra::RealField;
use serde::{Deserialize, Serialize};

/// 2D affine transform `p' = A p + t` with `A = [[a11, a12], [a21, a22]]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Affine2D<T> {
    /// Row 0, column 0 of the linear part.
    pub a11: T,
    /// Row 0, column 1 of the linear part.
    pub a12: T,
    /// Row 1, column 0 of the linear part.
    pub a21: T,
    /// Row 1, column 1 of the linear part.
    pub a22: T,
    /// Translation along x.
    pub tx: T,
    /// Translation along y.
    pub ty: T,
}

impl<T: RealField + Copy> Affine2D<T> {
    /// Create a new affine transform.
    pub fn new(a11: T, a12: T, a21: T, a22: T, tx: T, ty: T) -> Self {
        Self {
            a11,
            a12,
            a21,
            a22,
            tx,
            ty,
        }
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, p: &[T; 2]) -> [T; 2] {
        let (x, y) = (p[0], p[1]);
        [
            self.tx + self.a11 * x + self.a12 * y,
            self.ty + self.a21 * x + self.a22 * y,
        ]
    }

    /// The inverse transform, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a11 * self.a22 - self.a12 * self.a21;
        if det == T::zero() || !det.is_finite() {
            return None;
        }
        let inv = Self::new(
            self.a22 / det,
            -self.a12 / det,
            -self.a21 / det,
            self.a11 / det,
            T::zero(),
            T::zero(),
        );
        let t = inv.transform_point(&[self.tx, self.ty]);
        Some(Self {
            tx: -t[0],
            ty: -t[1],
            ..inv
        })
    }
}
