//! Levenberg-Marquardt optimizer for non-linear least squares problems
//!
//! The Levenberg-Marquardt algorithm is a trust-region method that combines
//! the advantages of gradient descent and Gauss-Newton methods. It solves
//! the damped normal equations: (J^T J + λI) δ = -J^T r
//!
//! The Jacobian is estimated with forward differences, so any [`FunctionNtoM`] can be minimized.

use nalgebra::{DMatrix, DVector, RealField};

use crate::{FunctionNtoM, OptimError};

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerResult<T> {
    /// Refined parameters
    pub params: Vec<T>,
    /// Final cost (sum of squared residuals)
    pub final_cost: T,
    /// Number of iterations performed
    pub iterations: usize,
    /// Reason for termination
    pub termination_reason: TerminationReason,
}

impl<T> OptimizerResult<T> {
    /// Returns true if the optimizer stopped on one of its convergence tests.
    pub fn converged(&self) -> bool {
        matches!(
            self.termination_reason,
            TerminationReason::CostConverged
                | TerminationReason::GradientConverged
                | TerminationReason::StepConverged
        )
    }
}

/// Reason why the optimizer terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Converged: relative cost change below tolerance
    CostConverged,
    /// Converged: gradient norm below tolerance
    GradientConverged,
    /// Converged: step norm below tolerance
    StepConverged,
    /// Maximum iterations reached
    MaxIterations,
    /// Lambda exceeded maximum (likely numerical issues)
    LambdaMaxExceeded,
}

/// Levenberg-Marquardt optimizer configuration.
#[derive(Debug, Clone)]
pub struct LevenbergMarquardt {
    /// Initial damping parameter
    pub lambda_init: f64,
    /// Maximum damping parameter
    pub lambda_max: f64,
    /// Factor for lambda adaptation
    pub lambda_factor: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold for the relative cost change of an accepted step
    pub cost_tolerance: f64,
    /// Convergence threshold for the gradient norm
    pub gradient_tolerance: f64,
    /// Convergence threshold for the step norm, relative to the parameter norm
    pub step_tolerance: f64,
}

impl Default for LevenbergMarquardt {
    fn default() -> Self {
        Self {
            lambda_init: 1e-3,
            lambda_max: 1e10,
            lambda_factor: 10.0,
            max_iterations: 100,
            cost_tolerance: 1e-12,
            gradient_tolerance: 1e-12,
            step_tolerance: 1e-12,
        }
    }
}

impl LevenbergMarquardt {
    /// Lower bound of the damping parameter.
    const LAMBDA_MIN: f64 = 1e-10;

    /// Create a new optimizer with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimize the sum of squared residuals of `function` starting from `initial`.
    ///
    /// # Arguments
    ///
    /// * `function` - The residual function to minimize
    /// * `initial` - Initial parameters, of length `function.num_inputs()`
    ///
    /// # Returns
    ///
    /// Optimization result containing refined parameters, final cost, iterations, and termination
    /// reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions do not match, the initial residuals are not finite, or
    /// the damped system cannot be solved.
    pub fn optimize<T, F>(&self, function: &F, initial: &[T]) -> Result<OptimizerResult<T>, OptimError>
    where
        T: RealField + Copy,
        F: FunctionNtoM<T> + ?Sized,
    {
        let n = function.num_inputs();
        let m = function.num_outputs();

        if initial.len() != n {
            return Err(OptimError::DimensionMismatch {
                expected: n,
                actual: initial.len(),
            });
        }
        if m == 0 {
            return Err(OptimError::NoResiduals);
        }

        let lambda_factor: T = nalgebra::convert(self.lambda_factor);
        let lambda_max: T = nalgebra::convert(self.lambda_max);
        let lambda_min: T = nalgebra::convert(Self::LAMBDA_MIN);
        let cost_tolerance: T = nalgebra::convert(self.cost_tolerance);
        let gradient_tolerance: T = nalgebra::convert(self.gradient_tolerance);
        let step_tolerance: T = nalgebra::convert(self.step_tolerance);

        let mut params = DVector::from_column_slice(initial);
        let mut residuals = DVector::zeros(m);
        function.process(params.as_slice(), residuals.as_mut_slice())?;
        if residuals.iter().any(|r| !r.is_finite()) {
            return Err(OptimError::NonFiniteResidual);
        }

        let mut current_cost = residuals.norm_squared();
        let mut lambda: T = nalgebra::convert(self.lambda_init);
        let mut iterations = 0;

        let mut jacobian = DMatrix::zeros(m, n);
        let mut candidate_residuals = DVector::zeros(m);

        let finish = |params: DVector<T>, cost, iterations, reason| OptimizerResult {
            params: params.as_slice().to_vec(),
            final_cost: cost,
            iterations,
            termination_reason: reason,
        };

        loop {
            if iterations >= self.max_iterations {
                log::warn!(
                    "Levenberg-Marquardt stopped after {} iterations, cost {:?}",
                    iterations,
                    current_cost
                );
                return Ok(finish(
                    params,
                    current_cost,
                    iterations,
                    TerminationReason::MaxIterations,
                ));
            }

            // Build normal equations: J^T J and J^T r
            self.numerical_jacobian(function, &params, &residuals, &mut jacobian)?;
            let jtj = jacobian.tr_mul(&jacobian);
            let jtr = jacobian.tr_mul(&residuals);

            // Check gradient convergence
            if jtr.norm() < gradient_tolerance {
                return Ok(finish(
                    params,
                    current_cost,
                    iterations,
                    TerminationReason::GradientConverged,
                ));
            }

            // Solve damped system: (J^T J + λI) δ = -J^T r
            let delta = Self::solve_damped_system(&jtj, &jtr, lambda)?;

            let step_norm = delta.norm();
            if step_norm <= step_tolerance * (params.norm() + step_tolerance) {
                return Ok(finish(
                    params,
                    current_cost,
                    iterations,
                    TerminationReason::StepConverged,
                ));
            }

            let candidate = &params + &delta;
            function.process(candidate.as_slice(), candidate_residuals.as_mut_slice())?;
            let new_cost = candidate_residuals.norm_squared();
            iterations += 1;

            let cost_change = current_cost - new_cost;
            if cost_change > T::zero() {
                // Step improved cost: accept it and decrease lambda
                let relative_cost_change = cost_change / current_cost;
                params = candidate;
                std::mem::swap(&mut residuals, &mut candidate_residuals);
                current_cost = new_cost;

                lambda /= lambda_factor;
                if lambda < lambda_min {
                    lambda = lambda_min;
                }

                log::debug!(
                    "iteration {}: cost {:?}, lambda {:?}",
                    iterations,
                    current_cost,
                    lambda
                );

                if relative_cost_change < cost_tolerance {
                    return Ok(finish(
                        params,
                        current_cost,
                        iterations,
                        TerminationReason::CostConverged,
                    ));
                }
            } else {
                // Step increased cost (or was not finite): reject it and increase lambda
                lambda *= lambda_factor;

                if lambda > lambda_max {
                    log::warn!(
                        "Levenberg-Marquardt damping exceeded {:?}, cost {:?}",
                        lambda_max,
                        current_cost
                    );
                    return Ok(finish(
                        params,
                        current_cost,
                        iterations,
                        TerminationReason::LambdaMaxExceeded,
                    ));
                }
            }
        }
    }

    /// Forward-difference Jacobian of `function` at `params`.
    fn numerical_jacobian<T, F>(
        &self,
        function: &F,
        params: &DVector<T>,
        residuals: &DVector<T>,
        jacobian: &mut DMatrix<T>,
    ) -> Result<(), OptimError>
    where
        T: RealField + Copy,
        F: FunctionNtoM<T> + ?Sized,
    {
        let step_base = T::default_epsilon().sqrt();
        let mut perturbed = params.clone();
        let mut shifted = DVector::zeros(residuals.len());

        for j in 0..params.len() {
            let x = params[j];
            let h = if x.abs() > T::one() {
                step_base * x.abs()
            } else {
                step_base
            };

            perturbed[j] = x + h;
            function.process(perturbed.as_slice(), shifted.as_mut_slice())?;
            perturbed[j] = x;

            for i in 0..residuals.len() {
                jacobian[(i, j)] = (shifted[i] - residuals[i]) / h;
            }
        }
        Ok(())
    }

    /// Solve the damped system (J^T J + λI) δ = -J^T r.
    fn solve_damped_system<T: RealField + Copy>(
        jtj: &DMatrix<T>,
        jtr: &DVector<T>,
        lambda: T,
    ) -> Result<DVector<T>, OptimError> {
        // Build damped Hessian: H = J^T J + λI
        let mut h = jtj.clone();
        for i in 0..h.nrows() {
            h[(i, i)] += lambda;
        }

        // Solve H δ = -J^T r
        let rhs = -jtr;
        h.lu()
            .solve(&rhs)
            .ok_or_else(|| OptimError::SolveFailed("LU solve failed".to_string()))
    }
}
