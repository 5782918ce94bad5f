use thiserror::Error;

/// Errors a scheme can return while advancing one step.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("newton iteration did not converge after {iters} iterations (residual {residual:e})")]
    NewtonNotConverged { iters: usize, residual: f64 },

    #[error("newton matrix is singular at iteration {iter}")]
    SingularNewtonMatrix { iter: usize },
}

/// Errors from constructing a [`StepGrid`](super::StepGrid).
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("horizon must be finite and non-negative, got {0}")]
    Horizon(f64),
}
