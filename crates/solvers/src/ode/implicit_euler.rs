use epifit_core::{Const, DimMin, Matrix, Vector, VectorField, lu_solve_in_place};
use log::trace;
use thiserror::Error;

use super::{Error, Scheme, StepGrid};

/// Stopping rule for the Newton iteration inside [`ImplicitEuler`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NewtonConfig {
    max_iters: usize,
    tolerance: f64,
}

/// Errors that can occur when validating a [`NewtonConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iters must be positive")]
    MaxIters,

    #[error("tolerance must be finite and positive")]
    Tolerance,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            tolerance: 100.0 * f64::EPSILON,
        }
    }
}

impl NewtonConfig {
    /// Creates a new config.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or `tolerance` is not a
    /// finite positive number.
    pub fn new(max_iters: usize, tolerance: f64) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        Ok(Self {
            max_iters,
            tolerance,
        })
    }

    /// Returns the iteration cap.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the relative residual tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

/// Backward Euler, solving `new - old - dt * f(new) = 0` by Newton's method.
///
/// Each step starts from `new = old` and iterates
///
/// ```text
/// r    = (old - new) + dt * f(new)
/// new -= (dt * J(new) - I)⁻¹ r
/// ```
///
/// until `‖r‖∞ / ‖old‖₁` drops below the configured tolerance. When `old` is
/// the zero vector the residual is used unscaled. The linear system is solved
/// by LU factorization with partial pivoting.
#[derive(Debug, Clone)]
pub struct ImplicitEuler<const N: usize> {
    grid: StepGrid,
    config: NewtonConfig,
    jacobian: Matrix<N>,
}

impl<const N: usize> ImplicitEuler<N> {
    /// Creates the scheme with a custom Newton stopping rule.
    #[must_use]
    pub fn with_config(grid: StepGrid, config: NewtonConfig) -> Self {
        Self {
            grid,
            config,
            jacobian: Matrix::zeros(),
        }
    }

    /// Returns the Newton stopping rule.
    #[must_use]
    pub fn config(&self) -> &NewtonConfig {
        &self.config
    }
}

impl<const N: usize> Scheme<N> for ImplicitEuler<N>
where
    Const<N>: DimMin<Const<N>, Output = Const<N>>,
{
    const NAME: &'static str = "bwe";

    fn from_grid(grid: StepGrid) -> Self {
        Self::with_config(grid, NewtonConfig::default())
    }

    fn grid(&self) -> StepGrid {
        self.grid
    }

    fn advance<F: VectorField<N>>(
        &mut self,
        field: &F,
        old: &Vector<N>,
        new: &mut Vector<N>,
    ) -> Result<(), Error> {
        let dt = self.grid.dt();
        let scale = match old.lp_norm(1) {
            norm if norm > 0.0 => norm,
            _ => 1.0,
        };

        *new = *old;
        let mut residual = Vector::zeros();
        let mut relative = f64::INFINITY;

        for iter in 0..self.config.max_iters {
            field.derivative_into(new, &mut residual);
            residual = old - *new + residual * dt;

            relative = residual.amax() / scale;
            trace!("newton iter {iter}: relative residual {relative:e}");
            if relative < self.config.tolerance {
                return Ok(());
            }

            field.jacobian(new, &mut self.jacobian);
            self.jacobian *= dt;
            for i in 0..N {
                self.jacobian[(i, i)] -= 1.0;
            }

            if !lu_solve_in_place(self.jacobian, &mut residual) {
                return Err(Error::SingularNewtonMatrix { iter });
            }
            *new -= residual;
        }

        Err(Error::NewtonNotConverged {
            iters: self.config.max_iters,
            residual: relative,
        })
    }
}
