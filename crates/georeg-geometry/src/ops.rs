use nalgebra::RealField;

/// Compute the Euclidean distance between two 2D points.
///
/// Example:
/// ```
/// use georeg_geometry::ops::euclidean_distance2;
///
/// let d = euclidean_distance2(&[0.0, 0.0], &[3.0, 4.0]);
/// assert_eq!(d, 5.0);
/// ```
pub fn euclidean_distance2<T: RealField + Copy>(a: &[T; 2], b: &[T; 2]) -> T {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Compute the Euclidean distance between two 3D points.
///
/// # Arguments
///
/// * `a` - A point in 3D space.
/// * `b` - Another point in 3D space.
///
/// Example:
/// ```
/// use georeg_geometry::ops::euclidean_distance3;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// let dst = euclidean_distance3(&a, &b);
/// ```
pub fn euclidean_distance3<T: RealField + Copy>(a: &[T; 3], b: &[T; 3]) -> T {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Rotate a 2D point counter-clockwise about the origin by `yaw` radians.
pub fn rotate2<T: RealField + Copy>(yaw: T, p: &[T; 2]) -> [T; 2] {
    let (s, c) = yaw.sin_cos();
    [c * p[0] - s * p[1], s * p[0] + c * p[1]]
}

/// Multiply a row-major 3x3 matrix with a 3D point.
pub fn mat33_mul_point<T: RealField + Copy>(m: &[[T; 3]; 3], p: &[T; 3]) -> [T; 3] {
    [
        m[0][0] * p[0] + m[0][1] * p[1] + m[0][2] * p[2],
        m[1][0] * p[0] + m[1][1] * p[1] + m[1][2] * p[2],
        m[2][0] * p[0] + m[2][1] * p[1] + m[2][2] * p[2],
    ]
}

/// Determinant of a row-major 3x3 matrix.
pub fn det33<T: RealField + Copy>(m: &[[T; 3]; 3]) -> T {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}
