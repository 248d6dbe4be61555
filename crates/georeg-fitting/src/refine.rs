//! Nonlinear refinement of a parametric model over a residual function.

use georeg_optim::{FunctionNtoM, LevenbergMarquardt, TerminationReason};
use nalgebra::RealField;

use crate::codec::ModelCodec;
use crate::FitError;

/// A model refined by the Levenberg-Marquardt solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinedModel<M, T> {
    /// The refined model.
    pub model: M,
    /// Sum of squared residuals at the refined model.
    pub final_cost: T,
    /// Number of solver iterations.
    pub iterations: usize,
    /// Why the solver stopped.
    pub termination_reason: TerminationReason,
}

impl<M, T> RefinedModel<M, T> {
    /// Returns true if the solver stopped on one of its convergence tests.
    pub fn converged(&self) -> bool {
        matches!(
            self.termination_reason,
            TerminationReason::CostConverged
                | TerminationReason::GradientConverged
                | TerminationReason::StepConverged
        )
    }
}

/// Encode `initial`, minimize `function` from there and decode the result.
pub(crate) fn refine<T, C, F>(
    optimizer: &LevenbergMarquardt,
    codec: &C,
    function: &F,
    initial: &C::Model,
) -> Result<RefinedModel<C::Model, T>, FitError>
where
    T: RealField + Copy,
    C: ModelCodec<T>,
    F: FunctionNtoM<T>,
{
    let params = codec.encode(initial);
    let result = optimizer.optimize(function, &params)?;

    log::debug!(
        "refinement stopped after {} iterations ({:?}), cost {:?}",
        result.iterations,
        result.termination_reason,
        result.final_cost
    );

    Ok(RefinedModel {
        model: codec.decode(&result.params)?,
        final_cost: result.final_cost,
        iterations: result.iterations,
        termination_reason: result.termination_reason,
    })
}
