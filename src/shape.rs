//! Step directions and the shape helpers built on them.

use std::hash::Hash;

use itertools::Itertools;
use strum::VariantArray;

use crate::location::Location;

/// Functionality that must be implemented on a case-by-case basis for any kind of grid step.
///
/// [`SquareStep`] is the built-in implementation, moving along the four axes of a rectangular grid.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash + Ord + PartialOrd {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result is not bounds checked; stepping off the top or left edge wraps to an unreachable coordinate.
    fn attempt_from(&self, location: Location) -> Location;
    /// Invert the direction specified by `self`.
    fn invert(&self) -> Self;
    /// A single character drawn on a rendered route for a step arriving in this direction.
    fn glyph(&self) -> char;
}

/// The four axis directions of a rectangular grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Step for SquareStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn glyph(&self) -> char {
        match self {
            Self::Up => '^',
            Self::Down => 'v',
            Self::Left => '<',
            Self::Right => '>',
        }
    }
}

/// Functionality on top of [`Step`] with identical implementation across all step kinds.
pub trait FullShape: Step {
    /// Every direction other than `self` and its inverse.
    fn turns(&self) -> Vec<Self>;
    /// Determine the direction from `a` to `b` by calling [`attempt_from`](Step::attempt_from) until one works.
    ///
    /// Returns [`None`] unless `a` and `b` are one step apart.
    fn direction_to(a: Location, b: Location) -> Option<Self>;
}

impl<Sh> FullShape for Sh
where
    Sh: Step,
{
    fn turns(&self) -> Vec<Self> {
        Self::VARIANTS.iter()
            .filter(|dir| **dir != *self && **dir != self.invert())
            .copied()
            .collect_vec()
    }

    fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
