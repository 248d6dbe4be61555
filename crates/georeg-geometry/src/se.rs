use nalgebra::RealField;
use serde::{Deserialize, Serialize};

use crate::ops::{mat33_mul_point, rotate2};

/// Rigid body motion in 2D, stored as a translation and a yaw angle.
///
/// A point is mapped as `p' = R(yaw) * p + translation`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Se2<T> {
    /// Translation vector `[tx, ty]`.
    pub translation: [T; 2],
    /// Rotation angle in radians, counter-clockwise.
    pub yaw: T,
}

impl<T: RealField + Copy> Se2<T> {
    /// Create a new transform from its translation and yaw.
    pub fn new(tx: T, ty: T, yaw: T) -> Self {
        Self {
            translation: [tx, ty],
            yaw,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, p: &[T; 2]) -> [T; 2] {
        let r = rotate2(self.yaw, p);
        [r[0] + self.translation[0], r[1] + self.translation[1]]
    }

    /// Apply the transform to every point in `src`, writing into `dst`.
    ///
    /// PRECONDITION: `dst` has the same length as `src`.
    pub fn transform_points(&self, src: &[[T; 2]], dst: &mut [[T; 2]]) {
        assert_eq!(src.len(), dst.len());
        for (p, q) in src.iter().zip(dst.iter_mut()) {
            *q = self.transform_point(p);
        }
    }

    /// The inverse transform, mapping destination points back to the source frame.
    pub fn inverse(&self) -> Self {
        let t = rotate2(-self.yaw, &self.translation);
        Self::new(-t[0], -t[1], -self.yaw)
    }

    /// Rotation as a row-major 2x2 matrix.
    pub fn rotation_matrix(&self) -> [[T; 2]; 2] {
        let (s, c) = self.yaw.sin_cos();
        [[c, -s], [s, c]]
    }
}

/// Rigid body motion in 3D.
///
/// A point is mapped as `p' = rotation * p + translation`. The rotation is stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Se3<T> {
    /// Proper rotation matrix, row-major.
    pub rotation: [[T; 3]; 3],
    /// Translation vector.
    pub translation: [T; 3],
}

impl<T: RealField + Copy> Default for Se3<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: RealField + Copy> Se3<T> {
    /// Create a new transform from a row-major rotation and a translation.
    pub fn new(rotation: [[T; 3]; 3], translation: [T; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        let (o, z) = (T::one(), T::zero());
        Self::new([[o, z, z], [z, o, z], [z, z, o]], [z, z, z])
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, p: &[T; 3]) -> [T; 3] {
        let r = mat33_mul_point(&self.rotation, p);
        [
            r[0] + self.translation[0],
            r[1] + self.translation[1],
            r[2] + self.translation[2],
        ]
    }

    /// Apply the transform to every point in `src`, writing into `dst`.
    ///
    /// PRECONDITION: `dst` has the same length as `src`.
    pub fn transform_points(&self, src: &[[T; 3]], dst: &mut [[T; 3]]) {
        assert_eq!(src.len(), dst.len());
        for (p, q) in src.iter().zip(dst.iter_mut()) {
            *q = self.transform_point(p);
        }
    }

    /// The inverse transform: `R' = R^T`, `t' = -R^T t`.
    pub fn inverse(&self) -> Self {
        let r = &self.rotation;
        let rt = [
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ];
        let t = mat33_mul_point(&rt, &self.translation);
        Self::new(rt, [-t[0], -t[1], -t[2]])
    }

    /// Build a transform from XYZ Euler angles (`R = Rz * Ry * Rx`) and a translation.
    pub fn from_euler_xyz(rot_x: T, rot_y: T, rot_z: T, translation: [T; 3]) -> Self {
        let (sx, cx) = rot_x.sin_cos();
        let (sy, cy) = rot_y.sin_cos();
        let (sz, cz) = rot_z.sin_cos();
        let rotation = [
            [cz * cy, cz * sy * sx - sz * cx, cz * sy * cx + sz * sx],
            [sz * cy, sz * sy * sx + cz * cx, sz * sy * cx - cz * sx],
            [-sy, cy * sx, cy * cx],
        ];
        Self::new(rotation, translation)
    }
}
