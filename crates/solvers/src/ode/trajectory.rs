use epifit_core::{Vector, VectorField};
use log::trace;
use nalgebra::{Const, Dyn, OMatrix};
use thiserror::Error;

use super::{Error, Scheme, StepGrid};

/// States recorded across a grid: `N` rows, one column per grid point.
///
/// Column 0 holds the initial condition and column `j` the state after `j` steps.
pub type Trajectory<const N: usize> = OMatrix<f64, Const<N>, Dyn>;

/// A scheme failure, tagged with the step that could not be taken.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("integration failed at step {step}: {source}")]
pub struct SolveError {
    /// Index of the column that could not be computed.
    pub step: usize,
    pub source: Error,
}

/// Drives a [`Scheme`] across its whole grid.
#[derive(Debug, Clone)]
pub struct TrajectorySolver<S> {
    scheme: S,
}

impl<S> TrajectorySolver<S> {
    /// Wraps a configured scheme.
    #[must_use]
    pub fn new(scheme: S) -> Self {
        Self { scheme }
    }

    /// Returns the wrapped scheme.
    #[must_use]
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Allocates a buffer with one column per grid point.
    #[must_use]
    pub fn buffer<const N: usize>(&self) -> Trajectory<N>
    where
        S: Scheme<N>,
    {
        Trajectory::<N>::zeros(self.scheme.grid().steps() + 1)
    }

    /// Integrates `field` from its initial condition and fills `buffer`.
    ///
    /// Every column is written in order. In debug builds the buffer is first
    /// filled with NaN so that any column left unwritten stands out.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] if the scheme fails to take a step. Columns
    /// before the failing step are valid; the rest are unspecified.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` does not have exactly one column per grid point.
    pub fn solve<const N: usize, F>(
        &mut self,
        field: &F,
        buffer: &mut Trajectory<N>,
    ) -> Result<(), SolveError>
    where
        S: Scheme<N>,
        F: VectorField<N>,
    {
        let grid: StepGrid = self.scheme.grid();
        assert_eq!(
            buffer.ncols(),
            grid.steps() + 1,
            "trajectory buffer has {} columns, grid needs {}",
            buffer.ncols(),
            grid.steps() + 1,
        );

        if cfg!(debug_assertions) {
            buffer.fill(f64::NAN);
        }

        let mut old = field.initial_condition();
        let mut new = Vector::zeros();
        buffer.set_column(0, &old);

        for step in 1..=grid.steps() {
            self.scheme
                .advance(field, &old, &mut new)
                .map_err(|source| SolveError { step, source })?;
            buffer.set_column(step, &new);
            old = new;
        }

        trace!(
            "{}: integrated {} steps of size {:e}",
            S::NAME,
            grid.steps(),
            grid.dt()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use epifit_core::Matrix;

    use crate::ode::{ExplicitEuler, ImplicitEuler, NewtonConfig};

    /// x' = -x on two components.
    struct Decay {
        initial: Vector<2>,
    }

    impl VectorField<2> for Decay {
        fn initial_condition(&self) -> Vector<2> {
            self.initial
        }

        fn set_initial_condition(&mut self, state: &Vector<2>) {
            self.initial = *state;
        }

        fn derivative_into(&self, state: &Vector<2>, out: &mut Vector<2>) {
            *out = -state;
        }

        fn jacobian(&self, _state: &Vector<2>, out: &mut Matrix<2>) {
            *out = -Matrix::<2>::identity();
        }
    }

    /// x' = x² with a constant Jacobian, so Newton converges slowly.
    struct Blowup;

    impl VectorField<1> for Blowup {
        fn initial_condition(&self) -> Vector<1> {
            Vector::<1>::new(1.0)
        }

        fn set_initial_condition(&mut self, _state: &Vector<1>) {}

        fn derivative_into(&self, state: &Vector<1>, out: &mut Vector<1>) {
            *out = Vector::<1>::new(state[0] * state[0]);
        }

        fn jacobian(&self, _state: &Vector<1>, out: &mut Matrix<1>) {
            *out = Matrix::<1>::new(0.0);
        }
    }

    #[test]
    fn fills_every_column_in_order() {
        let field = Decay {
            initial: Vector::<2>::new(1.0, 2.0),
        };
        let grid = StepGrid::new(4, 1.0).unwrap();
        let mut solver = TrajectorySolver::new(<ExplicitEuler as Scheme<2>>::from_grid(grid));

        let mut buffer = solver.buffer();
        solver.solve(&field, &mut buffer).unwrap();

        assert_eq!(buffer.ncols(), 5);
        for (j, column) in buffer.column_iter().enumerate() {
            let factor = 0.75_f64.powi(i32::try_from(j).unwrap());
            assert_relative_eq!(column[0], factor, epsilon = 1e-15);
            assert_relative_eq!(column[1], 2.0 * factor, epsilon = 1e-15);
        }
    }

    #[test]
    fn empty_grid_records_only_initial_condition() {
        let field = Decay {
            initial: Vector::<2>::new(3.0, 4.0),
        };
        let grid = StepGrid::new(0, 0.0).unwrap();
        let mut solver = TrajectorySolver::new(<ExplicitEuler as Scheme<2>>::from_grid(grid));

        let mut buffer = solver.buffer();
        solver.solve(&field, &mut buffer).unwrap();

        assert_eq!(buffer.ncols(), 1);
        assert_relative_eq!(buffer.column(0).into_owned(), field.initial_condition());
    }

    #[test]
    fn reports_failing_step() {
        let config = NewtonConfig::new(1, 1e-300).unwrap();
        let scheme = ImplicitEuler::<1>::with_config(StepGrid::new(3, 0.3).unwrap(), config);
        let mut solver = TrajectorySolver::new(scheme);

        let mut buffer = solver.buffer();
        let error = solver.solve(&Blowup, &mut buffer).unwrap_err();

        assert_eq!(error.step, 1);
        assert!(matches!(error.source, Error::NewtonNotConverged { iters: 1, .. }));
    }

    #[test]
    #[should_panic(expected = "trajectory buffer has 3 columns, grid needs 5")]
    fn wrong_buffer_width_panics() {
        let field = Decay {
            initial: Vector::<2>::new(1.0, 1.0),
        };
        let grid = StepGrid::new(4, 1.0).unwrap();
        let mut solver = TrajectorySolver::new(<ExplicitEuler as Scheme<2>>::from_grid(grid));

        let mut buffer = Trajectory::<2>::zeros(3);
        let _ = solver.solve(&field, &mut buffer);
    }
}
