use nalgebra::RealField;
use serde::{Deserialize, Serialize};

/// Ellipse as an implicit conic `a x² + b xy + c y² + d x + e y + f = 0`.
///
/// The coefficients are only defined up to a non-zero scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EllipseQuadratic<T> {
    /// Coefficient of x².
    pub a: T,
    /// Coefficient of xy.
    pub b: T,
    /// Coefficient of y².
    pub c: T,
    /// Coefficient of x.
    pub d: T,
    /// Coefficient of y.
    pub e: T,
    /// Constant term.
    pub f: T,
}

impl<T: RealField + Copy> EllipseQuadratic<T> {
    /// Create a new conic from its six coefficients.
    pub fn new(a: T, b: T, c: T, d: T, e: T, f: T) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Coefficients as `[a, b, c, d, e, f]`.
    pub fn coefficients(&self) -> [T; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Value of the implicit equation at `(x, y)`.
    pub fn evaluate(&self, x: T, y: T) -> T {
        self.a * x * x + self.b * x * y + self.c * y * y + self.d * x + self.e * y + self.f
    }

    /// Same conic with every coefficient divided by `f`.
    ///
    /// Used to compare fits that are only defined up to scale. Not meaningful when `f` is zero,
    /// i.e. when the conic passes through the origin.
    pub fn normalized_by_f(&self) -> Self {
        let f = self.f;
        Self::new(
            self.a / f,
            self.b / f,
            self.c / f,
            self.d / f,
            self.e / f,
            T::one(),
        )
    }

    /// Returns true when the discriminant `b² - 4ac` is negative.
    pub fn is_ellipse(&self) -> bool {
        let four: T = nalgebra::convert(4.0);
        self.b * self.b - four * self.a * self.c < T::zero()
    }
}

/// Ellipse described by center, semi-axes and the rotation of the major axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EllipseRotated<T> {
    /// Center `[x0, y0]`.
    pub center: [T; 2],
    /// Semi-axis along the rotated x-axis.
    pub a: T,
    /// Semi-axis along the rotated y-axis.
    pub b: T,
    /// Rotation of the ellipse in radians.
    pub phi: T,
}

impl<T: RealField + Copy> EllipseRotated<T> {
    /// Create a new rotated ellipse.
    pub fn new(x0: T, y0: T, a: T, b: T, phi: T) -> Self {
        Self {
            center: [x0, y0],
            a,
            b,
            phi,
        }
    }

    /// Point on the ellipse at parametric angle `theta`.
    pub fn point_at(&self, theta: T) -> [T; 2] {
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        let x = self.a * ct;
        let y = self.b * st;
        [
            self.center[0] + x * cp - y * sp,
            self.center[1] + x * sp + y * cp,
        ]
    }

    /// Convert into the implicit quadratic form.
    ///
    /// The resulting conic is scaled so that it evaluates to `-1` at the center.
    pub fn to_quadratic(&self) -> EllipseQuadratic<T> {
        let two: T = nalgebra::convert(2.0);
        let (s, c) = self.phi.sin_cos();
        let inv_a2 = T::one() / (self.a * self.a);
        let inv_b2 = T::one() / (self.b * self.b);
        let [x0, y0] = self.center;

        let qa = c * c * inv_a2 + s * s * inv_b2;
        let qb = two * c * s * (inv_a2 - inv_b2);
        let qc = s * s * inv_a2 + c * c * inv_b2;
        let qd = -two * qa * x0 - qb * y0;
        let qe = -qb * x0 - two * qc * y0;
        let qf = qa * x0 * x0 + qb * x0 * y0 + qc * y0 * y0 - T::one();

        EllipseQuadratic::new(qa, qb, qc, qd, qe, qf)
    }
}
