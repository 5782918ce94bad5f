use epifit_core::{Matrix, Parameterized, Vector, VectorField};

/// The five compartments, in state-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compartment {
    Susceptible,
    Infected,
    Quarantined,
    Recovered,
    Deceased,
}

impl Compartment {
    pub const ALL: [Self; 5] = [
        Self::Susceptible,
        Self::Infected,
        Self::Quarantined,
        Self::Recovered,
        Self::Deceased,
    ];

    /// Returns the position of this compartment in the state vector.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the one-letter label.
    #[must_use]
    pub fn label(self) -> char {
        match self {
            Self::Susceptible => 'S',
            Self::Infected => 'I',
            Self::Quarantined => 'Q',
            Self::Recovered => 'R',
            Self::Deceased => 'D',
        }
    }
}

/// Rate constants of the SIQRD model, all per day.
///
/// As a parameter vector the order is `[alpha, beta, gamma, delta, mu]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rates {
    /// Death rate of infected and quarantined individuals.
    pub alpha: f64,
    /// Transmission rate.
    pub beta: f64,
    /// Recovery rate.
    pub gamma: f64,
    /// Quarantine rate of infected individuals.
    pub delta: f64,
    /// Rate at which recovered individuals lose immunity.
    pub mu: f64,
}

impl Rates {
    #[must_use]
    pub fn from_vector(v: &Vector<5>) -> Self {
        Self {
            alpha: v[0],
            beta: v[1],
            gamma: v[2],
            delta: v[3],
            mu: v[4],
        }
    }

    #[must_use]
    pub fn to_vector(&self) -> Vector<5> {
        Vector::<5>::new(self.alpha, self.beta, self.gamma, self.delta, self.mu)
    }
}

/// The SIQRD epidemic model.
///
/// With `N = S + I + R` (quarantined and deceased do not mix):
///
/// ```text
/// S' = -β S I / N + μ R
/// I' =  I (β S / N - γ - δ - α)
/// Q' =  δ I - (γ + α) Q
/// R' =  γ (I + Q) - μ R
/// D' =  α (I + Q)
/// ```
///
/// The derivatives sum to zero, so total population is conserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Siqrd {
    rates: Rates,
    initial: Vector<5>,
}

impl Siqrd {
    #[must_use]
    pub fn new(rates: Rates, initial: Vector<5>) -> Self {
        Self { rates, initial }
    }

    #[must_use]
    pub fn rates(&self) -> &Rates {
        &self.rates
    }
}

impl VectorField<5> for Siqrd {
    fn initial_condition(&self) -> Vector<5> {
        self.initial
    }

    fn set_initial_condition(&mut self, state: &Vector<5>) {
        self.initial = *state;
    }

    #[allow(clippy::many_single_char_names)]
    fn derivative_into(&self, state: &Vector<5>, out: &mut Vector<5>) {
        let Rates {
            alpha,
            beta,
            gamma,
            delta,
            mu,
        } = self.rates;
        let (s, i, q, r) = (state[0], state[1], state[2], state[3]);
        let n = s + i + r;

        out[0] = -beta * s * (i / n) + mu * r;
        out[1] = i * (beta * (s / n) - gamma - delta - alpha);
        out[2] = delta * i - (gamma + alpha) * q;
        out[3] = gamma * (i + q) - mu * r;
        out[4] = alpha * (i + q);
    }

    /// Row and column order is S, I, Q, R, D. No equation reads D, so its
    /// column is zero.
    fn jacobian(&self, state: &Vector<5>, out: &mut Matrix<5>) {
        let Rates {
            alpha,
            beta,
            gamma,
            delta,
            mu,
        } = self.rates;
        let (s, i, r) = (state[0], state[1], state[3]);
        let n = s + i + r;
        let mixing = beta * s * i / (n * n);

        out.fill(0.0);

        out[(0, 0)] = -beta * i / n + mixing;
        out[(0, 1)] = -beta * s / n + mixing;
        out[(0, 3)] = mu + mixing;

        out[(1, 0)] = beta * i / n - mixing;
        out[(1, 1)] = beta * s / n - mixing - gamma - delta - alpha;
        out[(1, 3)] = -mixing;

        out[(2, 1)] = delta;
        out[(2, 2)] = -(gamma + alpha);

        out[(3, 1)] = gamma;
        out[(3, 2)] = gamma;
        out[(3, 3)] = -mu;

        out[(4, 1)] = alpha;
        out[(4, 2)] = alpha;
    }
}

impl Parameterized<5> for Siqrd {
    fn parameters(&self) -> Vector<5> {
        self.rates.to_vector()
    }

    fn set_parameters(&mut self, parameters: &Vector<5>) {
        self.rates = Rates::from_vector(parameters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn rates() -> Rates {
        Rates {
            alpha: 0.02,
            beta: 0.5,
            gamma: 0.1,
            delta: 0.05,
            mu: 0.02,
        }
    }

    fn states() -> [Vector<5>; 3] {
        [
            Vector::<5>::new(990.0, 10.0, 0.0, 0.0, 0.0),
            Vector::<5>::new(600.0, 250.0, 40.0, 100.0, 10.0),
            Vector::<5>::new(1.5, 0.25, 3.0, 0.75, 2.0),
        ]
    }

    #[test]
    fn derivative_conserves_population() {
        let other = Rates {
            alpha: 1.3,
            beta: 0.01,
            gamma: 2.0,
            delta: 0.7,
            mu: 0.0,
        };
        for rates in [rates(), other] {
            let model = Siqrd::new(rates, states()[0]);
            for state in states() {
                let total = model.derivative(&state).sum();
                assert_abs_diff_eq!(total, 0.0, epsilon = 1e-12 * state.sum());
            }
        }
    }

    #[test]
    fn jacobian_matches_central_differences() {
        let model = Siqrd::new(rates(), states()[0]);

        for state in states() {
            let mut jacobian = Matrix::zeros();
            model.jacobian(&state, &mut jacobian);

            // D is excluded: see `jacobian_d_entries`.
            for j in 0..4 {
                let h = 1e-6 * state[j].abs().max(1.0);
                let mut plus = state;
                let mut minus = state;
                plus[j] += h;
                minus[j] -= h;
                let column = (model.derivative(&plus) - model.derivative(&minus)) / (2.0 * h);

                for i in 0..5 {
                    assert_relative_eq!(
                        jacobian[(i, j)],
                        column[i],
                        epsilon = 1e-7,
                        max_relative = 1e-5
                    );
                }
            }
        }
    }

    #[test]
    fn jacobian_d_entries() {
        let model = Siqrd::new(rates(), states()[0]);
        let mut jacobian = Matrix::from_element(f64::NAN);
        model.jacobian(&states()[1], &mut jacobian);

        assert_eq!(jacobian.column(4).into_owned(), Vector::<5>::zeros());
        assert_relative_eq!(jacobian[(4, 1)], 0.02);
        assert_relative_eq!(jacobian[(4, 2)], 0.02);
    }

    #[test]
    fn parameter_vector_order() {
        let mut model = Siqrd::new(rates(), states()[0]);
        assert_eq!(
            model.parameters(),
            Vector::<5>::new(0.02, 0.5, 0.1, 0.05, 0.02)
        );

        model.set_parameters(&Vector::<5>::new(1.0, 2.0, 3.0, 4.0, 5.0));
        assert_eq!(
            *model.rates(),
            Rates {
                alpha: 1.0,
                beta: 2.0,
                gamma: 3.0,
                delta: 4.0,
                mu: 5.0,
            }
        );
    }

    #[test]
    fn compartments_follow_state_order() {
        let labels: String = Compartment::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, "SIQRD");
        assert_eq!(Compartment::Recovered.index(), 3);
    }
}
