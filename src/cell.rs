use crate::location::Location;

/// Cost of entering a single cell, and of a whole route.
pub type Cost = u32;

/// One grid cell: where it is and what it costs to enter.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Cell {
    /// Where the cell sits.
    pub location: Location,
    /// What it costs to step onto it.
    pub cost: Cost,
}
