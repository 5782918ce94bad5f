//! ODE models for the epifit workspace.
//!
//! - [`Siqrd`]: the five-compartment epidemic model fitted by `epifit`
//! - [`CubicRelaxation`]: a decoupled test system with a closed-form solution,
//!   used to measure the convergence order of integration schemes

mod cubic;
mod siqrd;

pub use cubic::CubicRelaxation;
pub use siqrd::{Compartment, Rates, Siqrd};
