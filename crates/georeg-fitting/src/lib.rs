#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Parameter codecs and the closed set of shape models.
pub mod codec;

/// Weighted algebraic ellipse fitting.
pub mod ellipse;

mod error;
pub use error::FitError;

/// Plane fitting by nonlinear refinement.
pub mod plane;

/// Refined model returned by the nonlinear fitters.
pub mod refine;

/// Residual functions over borrowed point sets.
pub mod residual;

/// Rigid motion fitters.
pub mod se;

/// Sphere fitting by nonlinear refinement.
pub mod sphere;

pub use codec::{ModelCodec, ShapeKind, ShapeModel};
pub use ellipse::{EllipseFitParams, FitEllipseWeightedAlgebraic};
pub use plane::FitPlaneToPoints;
pub use refine::RefinedModel;
pub use se::{
    MotionSe2PointSvd, MotionSe3PointCrossCovariance, MotionSe3PointSvd, MotionTransformPoint,
};
pub use sphere::FitSphereToPoints;
