#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// 2D affine transforms.
pub mod affine;

/// Quadratic and rotated ellipse representations.
pub mod ellipse;

/// Elementary point operations.
pub mod ops;

/// Planes in general form.
pub mod plane;

/// Special Euclidean transforms in 2D and 3D.
pub mod se;

/// Spheres in 3D.
pub mod sphere;

pub use affine::Affine2D;
pub use ellipse::{EllipseQuadratic, EllipseRotated};
pub use plane::PlaneGeneral3D;
pub use se::{Se2, Se3};
pub use sphere::Sphere3D;
