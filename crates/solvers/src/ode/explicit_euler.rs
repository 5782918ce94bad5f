use epifit_core::{Vector, VectorField};

use super::{Error, Scheme, StepGrid};

/// Forward Euler: `new = old + dt * f(old)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplicitEuler {
    grid: StepGrid,
}

impl<const N: usize> Scheme<N> for ExplicitEuler {
    const NAME: &'static str = "fwe";

    fn from_grid(grid: StepGrid) -> Self {
        Self { grid }
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
        field.derivative_into(old, new);
        *new = old + *new * self.grid.dt();
        Ok(())
    }
}
