//! Numerical solvers for the epifit workspace.
//!
//! - [`ode`]: fixed-step integration schemes and a trajectory driver
//! - [`optimization`]: a shared line search plus BFGS and conjugate gradient
//!   minimizers for any [`Objective`](epifit_core::Objective)

pub mod ode;
pub mod optimization;
