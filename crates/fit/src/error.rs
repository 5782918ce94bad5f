use epifit_solvers::{
    ode::{self, GridError, SolveError},
    optimization::{self, bfgs, cgm},
};
use thiserror::Error;

/// Errors from building or running a fit.
#[derive(Debug, Error)]
pub enum Error {
    #[error("population scale of the first observed day must be finite and positive, got {0}")]
    Scale(f64),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Optimization(#[from] optimization::Error),

    #[error("invalid newton settings: {0}")]
    Newton(#[from] ode::ConfigError),

    #[error("invalid bfgs settings: {0}")]
    Bfgs(#[from] bfgs::ConfigError),

    #[error("invalid cgm settings: {0}")]
    Cgm(#[from] cgm::ConfigError),
}
