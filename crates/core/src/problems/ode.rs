use crate::{Matrix, Vector};

/// The right-hand side of an autonomous ODE system `x' = f(x)` of dimension `N`.
///
/// A vector field also owns its initial condition, so an integration scheme
/// needs nothing but the field to produce a full trajectory. Implementations
/// must be deterministic: the same state always yields the same derivative.
pub trait VectorField<const N: usize> {
    /// Returns the state at the start of integration.
    fn initial_condition(&self) -> Vector<N>;

    /// Replaces the state at the start of integration.
    fn set_initial_condition(&mut self, state: &Vector<N>);

    /// Writes `f(state)` into `out`.
    fn derivative_into(&self, state: &Vector<N>, out: &mut Vector<N>);

    /// Returns `f(state)`.
    ///
    /// The default implementation delegates to [`derivative_into`](Self::derivative_into).
    fn derivative(&self, state: &Vector<N>) -> Vector<N> {
        let mut out = Vector::zeros();
        self.derivative_into(state, &mut out);
        out
    }

    /// Writes the Jacobian `∂f/∂x` evaluated at `state` into `out`.
    ///
    /// Row `i` holds the partial derivatives of component `i` of the field.
    /// Every entry of `out` must be written, including the zeros.
    fn jacobian(&self, state: &Vector<N>, out: &mut Matrix<N>);
}

/// A model whose `P` rate constants can be replaced between evaluations.
pub trait Parameterized<const P: usize> {
    /// Returns the current parameters.
    fn parameters(&self) -> Vector<P>;

    /// Replaces the current parameters.
    fn set_parameters(&mut self, parameters: &Vector<P>);
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// Independent exponential decay of two components.
    struct Decay {
        rates: Vector<2>,
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
            *out = -self.rates.component_mul(state);
        }

        fn jacobian(&self, _state: &Vector<2>, out: &mut Matrix<2>) {
            *out = Matrix::from_diagonal(&-self.rates);
        }
    }

    impl Parameterized<2> for Decay {
        fn parameters(&self) -> Vector<2> {
            self.rates
        }

        fn set_parameters(&mut self, parameters: &Vector<2>) {
            self.rates = *parameters;
        }
    }

    #[test]
    fn derivative_matches_in_place_variant() {
        let field = Decay {
            rates: Vector::<2>::new(0.5, 2.0),
            initial: Vector::<2>::new(1.0, 1.0),
        };
        let state = Vector::<2>::new(4.0, -1.0);

        let mut out = Vector::zeros();
        field.derivative_into(&state, &mut out);

        assert_relative_eq!(field.derivative(&state), out);
        assert_relative_eq!(out, Vector::<2>::new(-2.0, 2.0));
    }

    #[test]
    fn parameters_are_replaced_in_place() {
        let mut field = Decay {
            rates: Vector::<2>::new(0.5, 2.0),
            initial: Vector::<2>::new(1.0, 1.0),
        };

        field.set_parameters(&Vector::<2>::new(1.0, 1.0));
        field.set_initial_condition(&Vector::<2>::new(3.0, 3.0));

        assert_relative_eq!(field.parameters(), Vector::<2>::new(1.0, 1.0));
        assert_relative_eq!(
            field.derivative(&field.initial_condition()),
            Vector::<2>::new(-3.0, -3.0)
        );
    }
}
