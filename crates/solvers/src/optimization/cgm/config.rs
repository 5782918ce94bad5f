use thiserror::Error;

use super::Formula;
use crate::optimization::line_search;

/// Configuration for the conjugate gradient minimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
    max_step: f64,
    formula: Formula,
    line_search: line_search::Config,
}

/// Errors that can occur when validating a conjugate gradient config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive")]
    Tolerance,

    #[error("max_step must be finite and positive")]
    MaxStep,
}

impl Config {
    /// Creates a config for the given tolerance with default settings.
    ///
    /// The iteration cap is 1000, every line search starts from a step of
    /// 0.01, the line search floor equals the tolerance, and β follows
    /// Fletcher-Reeves.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is not a finite positive number.
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        let line_search = line_search::Config::default()
            .with_min_step(tolerance)
            .map_err(|_| ConfigError::Tolerance)?;

        Ok(Self {
            tolerance,
            max_iters: 1000,
            max_step: 0.01,
            formula: Formula::default(),
            line_search,
        })
    }

    /// Returns a copy with a different iteration cap.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }

    /// Returns a copy with a different initial line search step.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_step` is not a finite positive number.
    pub fn with_max_step(self, max_step: f64) -> Result<Self, ConfigError> {
        if !max_step.is_finite() || max_step <= 0.0 {
            return Err(ConfigError::MaxStep);
        }
        Ok(Self { max_step, ..self })
    }

    /// Returns a copy using a different β formula.
    #[must_use]
    pub fn with_formula(self, formula: Formula) -> Self {
        Self { formula, ..self }
    }

    /// Returns a copy with a different line search configuration.
    #[must_use]
    pub fn with_line_search(self, line_search: line_search::Config) -> Self {
        Self {
            line_search,
            ..self
        }
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    #[must_use]
    pub fn formula(&self) -> Formula {
        self.formula
    }

    #[must_use]
    pub fn line_search(&self) -> &line_search::Config {
        &self.line_search
    }
}
