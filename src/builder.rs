//! Incremental construction and validation of [`Grid`]s.

use std::num::NonZero;

use ndarray::Array2;
use thiserror::Error;

use crate::cell::Cost;
use crate::grid::Grid;

/// Reasons grid input may be rejected while building.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// A character other than an ASCII digit appeared in a row.
    #[error("row {row}, column {column}: expected a digit, found {found:?}")]
    NonDigit {
        /// Zero-based row of the offending character.
        row: usize,
        /// Zero-based column of the offending character.
        column: usize,
        /// The character itself.
        found: char,
    },
    /// A row is not as wide as the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Zero-based row that is the wrong width.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// There were no rows, or the first row had no cells.
    #[error("grid has no cells")]
    Empty,
}

/// Builds a [`Grid`] one row at a time.
///
/// Problems are recorded rather than returned immediately, so a builder can report every bad row of an input at once.
/// Once a builder is invalid, further rows are still checked but never stored.
#[derive(Clone, Debug, Default)]
pub struct GridBuilder {
    costs: Vec<Cost>,
    width: Option<usize>,
    rows: usize,
    invalid_reasons: Vec<ParseError>,
}

impl GridBuilder {
    /// Append a row given as text, one ASCII digit per cell.
    ///
    /// May cause the builder to enter a [`NonDigit`](ParseError::NonDigit) or [`Ragged`](ParseError::Ragged) invalid state.
    pub fn push_row(&mut self, line: &str) -> &mut Self {
        let row = self.rows;
        let mut costs = Vec::with_capacity(line.len());
        let mut clean = true;

        for (column, found) in line.chars().enumerate() {
            match found.to_digit(10) {
                Some(cost) => costs.push(cost),
                None => {
                    self.invalid_reasons.push(ParseError::NonDigit { row, column, found });
                    clean = false;
                }
            }
        }

        if clean {
            self.push_costs(costs)
        } else {
            self.rows += 1;
            self
        }
    }

    /// Append a row of already-known costs.
    ///
    /// May cause the builder to enter a [`Ragged`](ParseError::Ragged) invalid state.
    pub fn push_costs(&mut self, costs: impl IntoIterator<Item = Cost>) -> &mut Self {
        let row = self.rows;
        self.rows += 1;

        let start = self.costs.len();
        self.costs.extend(costs);
        let found = self.costs.len() - start;

        match self.width {
            None => self.width = Some(found),
            Some(expected) if expected != found => {
                self.costs.truncate(start);
                self.invalid_reasons.push(ParseError::Ragged { row, expected, found });
            }
            Some(_) => {}
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<ParseError>)` listing every problem otherwise.
    pub fn is_valid(&self) -> Option<&Vec<ParseError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the rows pushed so far into a [`Grid`].
    ///
    /// If the builder is invalid, the first problem recorded is returned.
    pub fn build(&self) -> Result<Grid, ParseError> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone());
        }

        let (Some(width), Some(height)) = (self.width.and_then(NonZero::new), NonZero::new(self.rows)) else {
            return Err(ParseError::Empty);
        };

        let costs = Array2::from_shape_vec((height.get(), width.get()), self.costs.clone())
            .map_err(|_| ParseError::Empty)?;

        Ok(Grid { costs, dims: (width, height) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    #[test]
    fn builds_from_rows_and_costs() {
        let grid = GridBuilder::default()
            .push_row("19")
            .push_costs([12, 0])
            .build()
            .unwrap();

        assert_eq!(grid.cost_at(Location(1, 0)), Ok(9));
        assert_eq!(grid.cost_at(Location(0, 1)), Ok(12));
        assert_eq!(format!("{}", grid), "19\n#0\n");
    }

    #[test]
    fn non_digit_reports_position() {
        let err = "123\n4x6\n".parse::<Grid>().unwrap_err();

        assert_eq!(err, ParseError::NonDigit { row: 1, column: 1, found: 'x' });
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = "123\n45\n678".parse::<Grid>().unwrap_err();

        assert_eq!(err, ParseError::Ragged { row: 1, expected: 3, found: 2 });
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!("".parse::<Grid>().unwrap_err(), ParseError::Empty);
        assert_eq!("\n\n".parse::<Grid>().unwrap_err(), ParseError::Empty);
        assert_eq!(GridBuilder::default().push_row("").build().unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn every_problem_is_kept() {
        let mut builder = GridBuilder::default();
        builder.push_row("12").push_row("a2").push_row("123");

        assert_eq!(builder.is_valid(), Some(&vec![
            ParseError::NonDigit { row: 1, column: 0, found: 'a' },
            ParseError::Ragged { row: 2, expected: 2, found: 3 },
        ]));
        assert_eq!(builder.build().unwrap_err(), ParseError::NonDigit { row: 1, column: 0, found: 'a' });
    }
}
