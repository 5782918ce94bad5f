//! Fit the rate constants of the SIQRD epidemic model to observed daily counts.
//!
//! A candidate set of [`Rates`] is scored by integrating the model from the
//! first observed day with a fixed-step scheme and summing the squared
//! mismatch against every observed day ([`LeastSquares`]). BFGS or nonlinear
//! conjugate gradients then minimize that score.
//!
//! # Example
//!
//! ```ignore
//! let observations: Observations<5> = std::fs::read_to_string("observations.in")?.parse()?;
//! let guess: Guess = std::fs::read_to_string("parameters.in")?.parse()?;
//!
//! let fit = epifit::fit(&FitConfig::default(), &observations, &guess)?;
//! println!("{:?} after {} iterations", fit.rates, fit.solution.iters);
//! ```

mod config;
mod error;
mod fit;
mod guess;
mod least_squares;
mod observations;
mod source;

pub use config::{FitConfig, OptimizerKind, SchemeKind};
pub use error::Error;
pub use fit::{Fit, fit, simulate, simulate_with};
pub use guess::{Guess, Outbreak};
pub use least_squares::{GRADIENT_STEP, LeastSquares, RATIO};
pub use observations::Observations;
pub use source::SourceError;

pub use epifit_models::{Compartment, Rates, Siqrd};
