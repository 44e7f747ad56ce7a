use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::num::NonZero;

use strum::VariantArray;
use thiserror::Error;
use tracing::{debug, trace};

use crate::cell::Cost;
use crate::grid::{Grid, GridError};
use crate::location::Location;
use crate::shape::{FullShape, SquareStep, Step};

/// Reasons a [`RouteSolver`] may fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// Every reachable state was expanded without ever stopping on the goal.
    ///
    /// Routes whose total would not fit in a [`Cost`] are never followed, so they end here too.
    #[error("no route from {start} to {goal} satisfies the run constraint")]
    Unreachable {
        /// Where the search began.
        start: Location,
        /// The location no route could stop on.
        goal: Location,
    },
    /// The start location is not on the grid.
    #[error(transparent)]
    OutOfRange(#[from] GridError),
}

/// Reasons a [`RunConstraint`] may be rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ConstraintError {
    /// `max_run` is set lower than `min_run`, so no straight stretch could satisfy both.
    #[error("maximum run {max} is shorter than minimum run {min}")]
    MaxBelowMin {
        /// Requested minimum run.
        min: usize,
        /// Requested maximum run.
        max: usize,
    },
}

/// Limits on how far a route travels in one direction.
///
/// `min_run` steps must be taken in a direction before turning or stopping; a `min_run` of 0 or 1 places no limit.
/// At most `max_run` steps may be taken in a direction before turning; [`None`] places no limit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct RunConstraint {
    min_run: usize,
    max_run: Option<NonZero<usize>>,
}

impl RunConstraint {
    /// Validate and build a constraint; `max_run` must not be below `min_run`.
    pub fn new(min_run: usize, max_run: Option<NonZero<usize>>) -> Result<Self, ConstraintError> {
        match max_run {
            Some(max) if max.get() < min_run => Err(ConstraintError::MaxBelowMin { min: min_run, max: max.get() }),
            _ => Ok(Self { min_run, max_run }),
        }
    }

    /// No run limits at all; the search degenerates to a plain shortest path.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// At most three steps in a row, no minimum.
    pub fn crucible() -> Self {
        Self { min_run: 0, max_run: NonZero::new(3) }
    }

    /// At least four and at most ten steps in a row.
    pub fn ultra_crucible() -> Self {
        Self { min_run: 4, max_run: NonZero::new(10) }
    }

    /// Steps required in a direction before turning or stopping.
    pub fn min_run(&self) -> usize {
        self.min_run
    }

    /// Steps allowed in a direction before turning, if capped.
    pub fn max_run(&self) -> Option<NonZero<usize>> {
        self.max_run
    }

    // `run` counts steps after the first, so `run + 1` steps have been taken
    #[inline]
    fn may_turn(&self, run: usize) -> bool {
        self.min_run <= 1 || run + 1 >= self.min_run
    }

    #[inline]
    fn may_continue(&self, run: usize) -> bool {
        self.max_run.map_or(true, |max| run + 1 < max.get())
    }
}

/// A node of the expanded search graph.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SearchState {
    /// Cell this state sits on.
    pub location: Location,
    /// Direction of the step that entered `location`.
    pub direction: SquareStep,
    /// Steps taken in `direction` beyond the first.
    pub run: usize,
}

/// A least-cost route found by a [`RouteSolver`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    /// Sum of the costs of every cell entered, excluding the start cell.
    pub cost: Cost,
    /// Number of states popped and expanded before the goal was accepted.
    pub expansions: usize,
    /// Number of distinct states given a cost during the search.
    pub discovered: usize,
    /// Every cell visited, start and goal inclusive.
    pub path: Vec<Location>,
}

/// Best-first search over a [`Grid`] for the cheapest route honouring a [`RunConstraint`].
///
/// A solver borrows its grid and keeps no state between calls to [`Self::solve`], so it can be reused for any number of searches.
pub struct RouteSolver<'a> {
    grid: &'a Grid,
    constraint: RunConstraint,
}

impl<'a> RouteSolver<'a> {
    /// A solver over `grid` honouring `constraint` on every search.
    pub fn new(grid: &'a Grid, constraint: RunConstraint) -> Self {
        Self { grid, constraint }
    }

    fn successors(&self, state: &SearchState) -> Vec<SquareStep> {
        if !self.constraint.may_turn(state.run) {
            return vec![state.direction];
        }

        let mut directions = state.direction.turns();
        if self.constraint.may_continue(state.run) {
            directions.push(state.direction);
        }
        directions
    }

    /// Find the cheapest route from `start` to `goal`.
    ///
    /// # Search
    /// The frontier is seeded with one step out of `start` in each direction, each with a run of zero.
    /// The cheapest frontier entry is popped and expanded: straight on if the run allows, and to either side if the minimum run is met.
    /// Reversing is never allowed.
    /// A successor is pushed only if it is on the grid and strictly cheaper than any cost already recorded for its [`SearchState`].
    ///
    /// The first goal state popped whose run meets the minimum is optimal, since every cell cost is non-negative.
    ///
    /// # Errors
    /// [`SolverFailure::OutOfRange`] if `start` is off the grid, and [`SolverFailure::Unreachable`] if the frontier empties first.
    pub fn solve(&self, start: Location, goal: Location) -> Result<Route, SolverFailure> {
        self.grid.cost_at(start)?;
        debug!(%start, %goal, min_run = self.constraint.min_run, max_run = ?self.constraint.max_run, "starting route search");

        if start == goal {
            return Ok(Route { cost: 0, expansions: 0, discovered: 0, path: vec![start] });
        }

        let mut best: HashMap<SearchState, Cost> = HashMap::new();
        let mut came_from: HashMap<SearchState, SearchState> = HashMap::new();
        let mut frontier: BinaryHeap<Reverse<(Cost, SearchState)>> = BinaryHeap::new();

        for direction in SquareStep::VARIANTS {
            let location = direction.attempt_from(start);
            if let Some(cost) = self.grid.get(location) {
                let state = SearchState { location, direction: *direction, run: 0 };
                best.insert(state, cost);
                frontier.push(Reverse((cost, state)));
            }
        }

        let mut expansions = 0;
        while let Some(Reverse((cost, state))) = frontier.pop() {
            if best.get(&state).is_some_and(|recorded| *recorded < cost) {
                // superseded by a cheaper push of the same state
                continue;
            }

            if state.location == goal && self.constraint.may_turn(state.run) {
                debug!(cost, expansions, discovered = best.len(), "route found");
                return Ok(Route {
                    cost,
                    expansions,
                    discovered: best.len(),
                    path: rebuild_path(&came_from, start, state),
                });
            }

            expansions += 1;
            for direction in self.successors(&state) {
                let location = direction.attempt_from(state.location);
                let Some(step_cost) = self.grid.get(location) else {
                    continue;
                };

                let next = SearchState {
                    location,
                    direction,
                    run: if direction == state.direction { state.run + 1 } else { 0 },
                };
                let Some(next_cost) = cost.checked_add(step_cost) else {
                    continue;
                };

                match best.entry(next) {
                    Entry::Occupied(recorded) if *recorded.get() <= next_cost => continue,
                    Entry::Occupied(mut recorded) => {
                        recorded.insert(next_cost);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(next_cost);
                    }
                }
                came_from.insert(next, state);
                frontier.push(Reverse((next_cost, next)));
            }
        }

        trace!(expansions, discovered = best.len(), "frontier exhausted");
        Err(SolverFailure::Unreachable { start, goal })
    }

    /// Shorthand for [`Self::solve`] when only the cost matters.
    pub fn least_cost(&self, start: Location, goal: Location) -> Result<Cost, SolverFailure> {
        self.solve(start, goal).map(|route| route.cost)
    }
}

fn rebuild_path(came_from: &HashMap<SearchState, SearchState>, start: Location, end: SearchState) -> Vec<Location> {
    let mut path = vec![end.location];
    let mut cursor = end;
    // seeds have no predecessor; the walk stops one step out of the start
    while let Some(previous) = came_from.get(&cursor) {
        path.push(previous.location);
        cursor = *previous;
    }
    path.push(start);
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_rejects_max_below_min() {
        assert_eq!(
            RunConstraint::new(5, NonZero::new(3)),
            Err(ConstraintError::MaxBelowMin { min: 5, max: 3 })
        );
        assert!(RunConstraint::new(4, NonZero::new(4)).is_ok());
        assert!(RunConstraint::new(7, None).is_ok());
    }

    #[test]
    fn minimum_forces_straight_moves() {
        let constraint = RunConstraint::ultra_crucible();

        assert!(!constraint.may_turn(0));
        assert!(!constraint.may_turn(2));
        assert!(constraint.may_turn(3));
        assert!(constraint.may_continue(8));
        assert!(!constraint.may_continue(9));
    }

    #[test]
    fn successors_never_reverse() {
        let grid: Grid = "111\n111\n111".parse().unwrap();
        let solver = RouteSolver::new(&grid, RunConstraint::crucible());
        let state = SearchState { location: Location(1, 1), direction: SquareStep::Right, run: 0 };

        let mut next = solver.successors(&state);
        next.sort();
        assert_eq!(next, vec![SquareStep::Up, SquareStep::Down, SquareStep::Right]);

        let capped = SearchState { run: 2, ..state };
        let mut next = solver.successors(&capped);
        next.sort();
        assert_eq!(next, vec![SquareStep::Up, SquareStep::Down]);
    }

    #[test]
    fn start_off_grid_is_out_of_range() {
        let grid: Grid = "12\n34".parse().unwrap();
        let solver = RouteSolver::new(&grid, RunConstraint::crucible());

        assert_eq!(
            solver.solve(Location(5, 5), Location(1, 1)),
            Err(SolverFailure::OutOfRange(GridError::OutOfRange(Location(5, 5))))
        );
    }
}
