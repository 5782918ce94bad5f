//! Fixed-step integration of autonomous ODE systems.
//!
//! A [`Scheme`] advances a [`VectorField`] by one step of a uniform
//! [`StepGrid`]. The [`TrajectorySolver`] repeats that step across the whole
//! grid and records every state in a caller-owned [`Trajectory`] buffer.
//!
//! # Schemes
//!
//! - [`ExplicitEuler`]: first order, one derivative evaluation per step
//! - [`ImplicitEuler`]: first order, Newton iteration on the implicit equation
//! - [`Heun`]: second order predictor-corrector
//!
//! Step size is never adapted.

mod error;
mod explicit_euler;
mod heun;
mod implicit_euler;
mod trajectory;

pub use error::{Error, GridError};
pub use explicit_euler::ExplicitEuler;
pub use heun::Heun;
pub use implicit_euler::{ConfigError, ImplicitEuler, NewtonConfig};
pub use trajectory::{SolveError, Trajectory, TrajectorySolver};

use epifit_core::{Vector, VectorField};

/// A uniform time grid: `steps` equal steps covering `[0, horizon]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepGrid {
    steps: usize,
    horizon: f64,
}

impl StepGrid {
    /// Creates a grid of `steps` steps spanning `horizon`.
    ///
    /// # Errors
    ///
    /// Returns an error if `horizon` is negative or non-finite.
    pub fn new(steps: usize, horizon: f64) -> Result<Self, GridError> {
        if !horizon.is_finite() || horizon < 0.0 {
            return Err(GridError::Horizon(horizon));
        }
        Ok(Self { steps, horizon })
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the total time covered by the grid.
    #[must_use]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Returns the step size, or zero for an empty grid.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dt(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.horizon / self.steps as f64
        }
    }
}

/// A single-step integration method over a fixed [`StepGrid`].
pub trait Scheme<const N: usize> {
    /// Short name used in logs and configuration.
    const NAME: &'static str;

    /// Builds the scheme with default settings for `grid`.
    fn from_grid(grid: StepGrid) -> Self
    where
        Self: Sized;

    /// Returns the grid this scheme steps across.
    fn grid(&self) -> StepGrid;

    /// Advances `old` by one step of the grid and writes the result into `new`.
    ///
    /// # Errors
    ///
    /// Returns an error if an implicit scheme fails to solve for `new`.
    fn advance<F: VectorField<N>>(
        &mut self,
        field: &F,
        old: &Vector<N>,
        new: &mut Vector<N>,
    ) -> Result<(), Error>;
}
