use thiserror::Error;

use crate::optimization::line_search;

/// Configuration for the BFGS minimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
    max_step: f64,
    line_search: line_search::Config,
}

/// Errors that can occur when validating a BFGS config.
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
    /// The iteration cap is 1000, every line search starts from a unit step,
    /// and the line search floor is `100 * tolerance`.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is not a finite positive number.
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        let line_search = line_search::Config::default()
            .with_min_step(100.0 * tolerance)
            .map_err(|_| ConfigError::Tolerance)?;

        Ok(Self {
            tolerance,
            max_iters: 1000,
            max_step: 1.0,
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

    /// Returns a copy with a different line search configuration.
    #[must_use]
    pub fn with_line_search(self, line_search: line_search::Config) -> Self {
        Self {
            line_search,
            ..self
        }
    }

    /// Returns the relative step tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the initial step of every line search.
    #[must_use]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    /// Returns the line search configuration.
    #[must_use]
    pub fn line_search(&self) -> &line_search::Config {
        &self.line_search
    }
}
