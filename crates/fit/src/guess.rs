use std::str::FromStr;

use epifit_core::Vector;
use epifit_models::Rates;

use crate::source::{SourceError, finite, numbers};

/// Starting rates for a fit, optionally with an initial outbreak for simulation.
///
/// The text form lists `beta mu gamma alpha delta`, optionally followed by
/// `S0 I0`. Fitting always starts from the first observed day, so the
/// initial outbreak is only used by forward simulations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guess {
    pub rates: Rates,
    pub outbreak: Option<Outbreak>,
}

/// Susceptible and infected counts at time zero; other compartments start empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outbreak {
    pub susceptible: f64,
    pub infected: f64,
}

impl Outbreak {
    /// Returns the full SIQRD initial state.
    #[must_use]
    pub fn state(&self) -> Vector<5> {
        Vector::<5>::new(self.susceptible, self.infected, 0.0, 0.0, 0.0)
    }
}

impl FromStr for Guess {
    type Err = SourceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::with_capacity(7);
        for (index, line) in text.lines().enumerate() {
            let row: Vec<f64> = numbers(index + 1, line.split_whitespace())?;
            finite(index + 1, &row)?;
            values.extend(row);
        }

        let (beta, mu, gamma, alpha, delta, outbreak) = match values[..] {
            [beta, mu, gamma, alpha, delta] => (beta, mu, gamma, alpha, delta, None),
            [beta, mu, gamma, alpha, delta, susceptible, infected] => (
                beta,
                mu,
                gamma,
                alpha,
                delta,
                Some(Outbreak {
                    susceptible,
                    infected,
                }),
            ),
            [] => return Err(SourceError::Empty),
            _ => return Err(SourceError::Guess(values.len())),
        };

        Ok(Self {
            rates: Rates {
                alpha,
                beta,
                gamma,
                delta,
                mu,
            },
            outbreak,
        })
    }
}
