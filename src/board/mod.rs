//! Arena representation and game-state types.
//!
//! Contains the core data structures for grid coordinates, unit
//! archetypes, and the snapshot the decision pipeline plans against.

pub mod coords;
pub mod state;
pub mod unit;

pub use coords::{all_cells, friendly_edge_cells, Coord, CELL_COUNT, FAR_ROW, GRID_SIZE};
pub use state::{Cell, CostTable, Snapshot};
pub use unit::{
    Archetype, Occupant, Side, Structure, ALL_ARCHETYPES, ALL_SIDES, MOBILE_ARCHETYPES,
    MOBILE_KIND_COUNT,
};
