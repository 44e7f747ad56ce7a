#![warn(missing_docs)]

//! # `crucible`
//!
//! Least-cost routes across a grid of per-cell costs, where a route may only travel so far in a straight line.
//! Begin by parsing a [`Grid`] from digit rows (or building one with a [`GridBuilder`](builder::GridBuilder)),
//! pick a [`RunConstraint`], then call [`RouteSolver::solve`] to get a [`Route`].
//!
//! ```
//! use crucible::{Grid, RouteSolver, RunConstraint};
//!
//! let grid: Grid = "2413\n3215\n3255".parse().unwrap();
//! let solver = RouteSolver::new(&grid, RunConstraint::crucible());
//! let route = solver.solve(grid.top_left(), grid.bottom_right()).unwrap();
//! assert_eq!(route.path.first(), Some(&grid.top_left()));
//! ```
//!
//! # Internals
//! A plain shortest path is not enough here, since whether a move is legal depends on how the route arrived.
//! The search therefore runs over an expanded graph whose nodes are [`SearchState`]s: a location, the direction of the step into it, and how many steps in a row have gone that way.
//! Edges of this graph follow the run limits, and the usual best-first argument applies unchanged because cell costs are never negative.

pub use builder::{GridBuilder, ParseError};
pub use cell::{Cell, Cost};
pub use grid::{Grid, GridError};
pub use location::Location;
pub use shape::SquareStep;
pub use solver::{ConstraintError, Route, RouteSolver, RunConstraint, SearchState, SolverFailure};

pub mod builder;
pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod location;
pub mod shape;
pub(crate) mod solver;
