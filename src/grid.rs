use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;
use thiserror::Error;

use crate::builder::{GridBuilder, ParseError};
use crate::cell::{Cell, Cost};
use crate::location::{Dimension, Location};
use crate::shape::{FullShape, SquareStep, Step};
use crate::solver::Route;

/// Errors raised by direct [`Grid`] queries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum GridError {
    /// The location lies outside the grid.
    #[error("location {0} is outside the grid")]
    OutOfRange(Location),
}

/// A rectangular grid of per-cell entry costs.
///
/// [`Grid`]s are immutable once built; parse one from text with [`str::parse`] or build one with a [`GridBuilder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    // indexed (row, column)
    pub(crate) costs: Array2<Cost>,
    // width, height
    pub(crate) dims: (Dimension, Dimension),
}

impl Grid {
    /// Width and height of this grid, in that order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Whether `location` lies on the grid.
    pub fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// The cost of entering `location`, or [`None`] if it is off the grid.
    #[inline]
    pub fn get(&self, location: Location) -> Option<Cost> {
        self.costs.get(location.as_index()).copied()
    }

    /// The cost of entering `location`.
    pub fn cost_at(&self, location: Location) -> Result<Cost, GridError> {
        self.get(location).ok_or(GridError::OutOfRange(location))
    }

    /// The [`Cell`] at `location`.
    pub fn cell_at(&self, location: Location) -> Result<Cell, GridError> {
        Ok(Cell { location, cost: self.cost_at(location)? })
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.costs.indexed_iter()
            .map(|(index, cost)| Cell { location: Location::from(index), cost: *cost })
    }

    /// The conventional start of a route.
    pub fn top_left(&self) -> Location {
        Location(0, 0)
    }

    /// The conventional goal of a route.
    pub fn bottom_right(&self) -> Location {
        Location(self.dims.0.get() - 1, self.dims.1.get() - 1)
    }

    /// Draw `route` over this grid.
    ///
    /// Each cell entered by the route shows the direction it was entered from; every other cell shows its cost.
    pub fn render_route(&self, route: &Route) -> String {
        let mut chars = self.costs.map(|cost| cost_char(*cost));

        for (from, to) in route.path.iter().tuple_windows() {
            if let (Some(step), Some(ptr)) = (SquareStep::direction_to(*from, *to), chars.get_mut(to.as_index())) {
                *ptr = step.glyph();
            }
        }

        print(&chars)
    }
}

fn cost_char(cost: Cost) -> char {
    char::from_digit(cost, 10).unwrap_or('#')
}

fn print(chars: &Array2<char>) -> String {
    let mut out = String::with_capacity(chars.nrows() * (chars.ncols() + 1));

    for row in chars.rows() {
        out.extend(row.iter());
        out.push('\n');
    }

    out
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(&self.costs.map(|cost| cost_char(*cost))))
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s.lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect_vec();
        // a file ending in blank lines is still a complete grid
        let used = lines.iter().rposition(|line| !line.is_empty()).map_or(0, |last| last + 1);

        let mut builder = GridBuilder::default();
        for line in &lines[..used] {
            builder.push_row(line);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_and_lookup() {
        let grid: Grid = "123\n456\n".parse().unwrap();

        assert_eq!(grid.dims().0.get(), 3);
        assert_eq!(grid.dims().1.get(), 2);
        assert!(grid.in_bounds(Location(2, 1)));
        assert!(!grid.in_bounds(Location(3, 0)));
        assert!(!grid.in_bounds(Location(0, 2)));
        assert!(!grid.in_bounds(Location(0, 0).offset_by((-1, 0))));

        assert_eq!(grid.cost_at(Location(0, 0)), Ok(1));
        assert_eq!(grid.cost_at(Location(2, 1)), Ok(6));
        assert_eq!(grid.cost_at(Location(1, 1)), Ok(5));
        assert_eq!(grid.cost_at(Location(3, 1)), Err(GridError::OutOfRange(Location(3, 1))));
        assert_eq!(grid.get(Location(0, 5)), None);
        assert_eq!(grid.bottom_right(), Location(2, 1));
    }

    #[test]
    fn cells_are_row_major() {
        let grid: Grid = "12\n34".parse().unwrap();

        assert_eq!(grid.cells().collect_vec(), vec![
            Cell { location: Location(0, 0), cost: 1 },
            Cell { location: Location(1, 0), cost: 2 },
            Cell { location: Location(0, 1), cost: 3 },
            Cell { location: Location(1, 1), cost: 4 },
        ]);
        assert_eq!(grid.cell_at(Location(1, 1)), Ok(Cell { location: Location(1, 1), cost: 4 }));
    }

    #[test]
    fn display_round_trips_text() {
        let text = "2413\n3215\n";
        let grid: Grid = text.parse().unwrap();

        assert_eq!(format!("{}", grid), text);
    }

    #[test]
    fn crlf_and_trailing_blank_lines() {
        let grid: Grid = "12\r\n34\r\n\n\n".parse().unwrap();

        assert_eq!(format!("{}", grid), "12\n34\n");
    }
}
