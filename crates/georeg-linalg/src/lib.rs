#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Centroids and cross-covariance of corresponding point sets.
pub mod covariance;

mod error;
pub use error::LinalgError;

/// Quaternion-based rotation estimation (Horn / Besl-McKay).
pub mod quaternion;

/// Optimal rotation from a cross-covariance matrix via SVD.
pub mod rotation;

/// Parameters for the iterative decompositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvdParams {
    /// Maximum number of iterations before the decomposition is reported as not converged.
    /// Zero means no limit.
    pub max_iterations: usize,
}

impl Default for SvdParams {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
        }
    }
}
