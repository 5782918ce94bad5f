use std::str::FromStr;

use epifit_core::Vector;

use crate::source::{SourceError, finite, numbers};

/// Observed states, one per day, starting with the initial condition.
///
/// The text form is a header line `days dim` followed by `days` rows of
/// `label v1 .. v_dim`. Labels are kept verbatim but play no part in fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations<const N: usize> {
    labels: Vec<String>,
    days: Vec<Vector<N>>,
}

impl<const N: usize> Observations<N> {
    /// Creates observations labelled by day index.
    ///
    /// # Errors
    ///
    /// Returns an error if `days` is empty or contains a non-finite value.
    /// Non-finite values are reported with `line` set to the day index.
    pub fn new(days: Vec<Vector<N>>) -> Result<Self, SourceError> {
        if days.is_empty() {
            return Err(SourceError::NoDays);
        }
        for (day, state) in days.iter().enumerate() {
            finite(day, state.as_slice())?;
        }
        let labels = (0..days.len()).map(|day| day.to_string()).collect();
        Ok(Self { labels, days })
    }

    /// Returns the number of observed days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always `false`: construction rejects empty sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Returns the state observed on day 0.
    #[must_use]
    pub fn initial(&self) -> &Vector<N> {
        &self.days[0]
    }

    /// Returns the state observed on `day`, if any.
    #[must_use]
    pub fn get(&self, day: usize) -> Option<&Vector<N>> {
        self.days.get(day)
    }

    /// Iterates over the observed states in day order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Vector<N>> {
        self.days.iter()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl<const N: usize> FromStr for Observations<N> {
    type Err = SourceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (line, header) = lines.next().ok_or(SourceError::Empty)?;
        let header: Vec<usize> = numbers(line, header.split_whitespace())?;
        let [expected_days, dim] = header[..] else {
            return Err(SourceError::Arity {
                line,
                expected: 2,
                found: header.len(),
            });
        };
        if dim != N {
            return Err(SourceError::Dimension {
                expected: N,
                found: dim,
            });
        }

        let mut labels = Vec::with_capacity(expected_days);
        let mut days = Vec::with_capacity(expected_days);
        for (line, row) in lines {
            let mut tokens = row.split_whitespace();
            let label = tokens.next().unwrap_or_default();
            let values: Vec<f64> = numbers(line, tokens)?;
            if values.len() != N {
                return Err(SourceError::Arity {
                    line,
                    expected: N + 1,
                    found: values.len() + 1,
                });
            }
            finite(line, &values)?;

            labels.push(label.to_owned());
            days.push(Vector::from_column_slice(&values));
        }

        if days.is_empty() {
            return Err(SourceError::NoDays);
        }
        if days.len() != expected_days {
            return Err(SourceError::Days {
                expected: expected_days,
                found: days.len(),
            });
        }
        Ok(Self { labels, days })
    }
}
