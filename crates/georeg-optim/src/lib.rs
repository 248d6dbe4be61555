#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod error;
mod function;
mod levenberg_marquardt;

// Re-exports
pub use error::OptimError;
pub use function::FunctionNtoM;
pub use levenberg_marquardt::{LevenbergMarquardt, OptimizerResult, TerminationReason};
