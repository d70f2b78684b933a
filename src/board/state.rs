//! Game state snapshots.
//!
//! [`Snapshot`] is the value-type copy of the arena the decision pipeline
//! works on: per-side health and resource pools, the turn index, and a
//! dense cell grid holding at most one structure plus stacked mobile units
//! per cell. Search clones snapshots freely; the authoritative state held
//! by the host engine is never written through one.
//!
//! The best-effort placement allocator lives here so that the simulator,
//! the executor, and the local arena all obey one legality rule:
//! insufficient resources or blocked cells mean fewer units placed, never
//! an error.

use super::coords::{all_cells, Coord, GRID_SIZE};
use super::unit::{Archetype, Occupant, Side, Structure, MOBILE_ARCHETYPES, MOBILE_KIND_COUNT};

/// Per-archetype placement costs, indexed by `Archetype as usize`.
///
/// Defaults come from [`Archetype::default_cost`]; the host config may
/// override individual entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostTable {
    costs: [f32; 6],
}

impl Default for CostTable {
    fn default() -> Self {
        CostTable {
            costs: [
                Archetype::Wall.default_cost(),
                Archetype::Support.default_cost(),
                Archetype::Turret.default_cost(),
                Archetype::Scout.default_cost(),
                Archetype::Demolisher.default_cost(),
                Archetype::Interceptor.default_cost(),
            ],
        }
    }
}

impl CostTable {
    pub fn cost(&self, archetype: Archetype) -> f32 {
        self.costs[archetype as usize]
    }

    pub fn set_cost(&mut self, archetype: Archetype, cost: f32) {
        self.costs[archetype as usize] = cost;
    }
}

/// One grid cell: an optional structure and per-(side, kind) mobile stacks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    pub structure: Option<Structure>,
    mobile: [[u8; MOBILE_KIND_COUNT]; 2],
}

impl Cell {
    /// Stacked mobile units of one kind for one side.
    pub fn mobile_count(&self, side: Side, archetype: Archetype) -> u32 {
        match archetype.mobile_slot() {
            Some(slot) => self.mobile[side as usize][slot] as u32,
            None => 0,
        }
    }

    /// All stacked mobile units for one side.
    pub fn mobile_total(&self, side: Side) -> u32 {
        self.mobile[side as usize].iter().map(|&n| n as u32).sum()
    }

    pub(crate) fn add_mobile(&mut self, side: Side, archetype: Archetype, count: u32) {
        if let Some(slot) = archetype.mobile_slot() {
            let stack = &mut self.mobile[side as usize][slot];
            *stack = stack.saturating_add(count.min(u8::MAX as u32) as u8);
        }
    }

    /// Removes up to `count` units from the stack; returns how many left.
    pub(crate) fn remove_mobile(&mut self, side: Side, archetype: Archetype, count: u32) -> u32 {
        match archetype.mobile_slot() {
            Some(slot) => {
                let stack = &mut self.mobile[side as usize][slot];
                let removed = (*stack as u32).min(count);
                *stack -= removed as u8;
                removed
            }
            None => 0,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.structure.is_none()
            && self.mobile_total(Side::Own) == 0
            && self.mobile_total(Side::Enemy) == 0
    }
}

/// Complete arena state at a point in time.
///
/// Health and resource pools are fixed-size arrays indexed by
/// `Side as usize`, cells by [`Coord::index`]; cloning is a flat copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub turn: u32,
    pub health: [f32; 2],
    pub mobile_points: [f32; 2],
    pub structure_points: [f32; 2],
    pub costs: CostTable,
    cells: [Cell; GRID_SIZE * GRID_SIZE],
}

impl Snapshot {
    /// An empty arena: no units, zero health and resources on both sides.
    pub fn empty(costs: CostTable) -> Snapshot {
        Snapshot {
            turn: 0,
            health: [0.0; 2],
            mobile_points: [0.0; 2],
            structure_points: [0.0; 2],
            costs,
            cells: [Cell::default(); GRID_SIZE * GRID_SIZE],
        }
    }

    /// The standard opening position: full health, starting pools, no units.
    pub fn opening(costs: CostTable) -> Snapshot {
        let mut snap = Snapshot::empty(costs);
        snap.health = [30.0; 2];
        snap.mobile_points = [5.0; 2];
        snap.structure_points = [40.0; 2];
        snap
    }

    pub fn cell(&self, at: Coord) -> &Cell {
        &self.cells[at.index()]
    }

    pub(crate) fn cell_mut(&mut self, at: Coord) -> &mut Cell {
        &mut self.cells[at.index()]
    }

    /// True once either side's health has reached zero.
    pub fn is_terminal(&self) -> bool {
        self.health[Side::Own as usize] <= 0.0 || self.health[Side::Enemy as usize] <= 0.0
    }

    /// The deploy-edge rule for mobile spawns: each side may only launch
    /// from its own edge diagonals.
    fn on_deploy_edge(at: Coord, side: Side) -> bool {
        match side {
            Side::Own => at.is_bottom_edge(),
            Side::Enemy => at.is_top_edge(),
        }
    }

    /// Legality of placing one unit at a cell, ignoring resources.
    pub fn can_place(&self, side: Side, archetype: Archetype, at: Coord) -> bool {
        if !at.is_valid() {
            return false;
        }
        let cell = self.cell(at);
        if archetype.is_mobile() {
            Self::on_deploy_edge(at, side) && cell.structure.is_none()
        } else {
            let own_half = match side {
                Side::Own => at.is_friendly_half(),
                Side::Enemy => !at.is_friendly_half(),
            };
            own_half
                && cell.structure.is_none()
                && cell.mobile_total(Side::Own) == 0
                && cell.mobile_total(Side::Enemy) == 0
        }
    }

    /// Best-effort placement of up to `count` units across `cells`.
    ///
    /// Mobile units are spread round-robin over the placeable cells;
    /// stationary units take one cell each, in the given order. Placement
    /// stops when the paying pool runs dry or no cell remains placeable.
    /// Returns the number of units actually placed.
    pub fn place_units(
        &mut self,
        side: Side,
        archetype: Archetype,
        cells: &[Coord],
        count: u32,
    ) -> u32 {
        if count == 0 || cells.is_empty() {
            return 0;
        }
        let cost = self.costs.cost(archetype);
        if archetype.is_mobile() {
            let usable: Vec<Coord> = cells
                .iter()
                .copied()
                .filter(|&c| self.can_place(side, archetype, c))
                .collect();
            if usable.is_empty() {
                return 0;
            }
            let mut placed = 0u32;
            while placed < count {
                if self.mobile_points[side as usize] < cost {
                    break;
                }
                let at = usable[placed as usize % usable.len()];
                self.cell_mut(at).add_mobile(side, archetype, 1);
                self.mobile_points[side as usize] -= cost;
                placed += 1;
            }
            placed
        } else {
            let mut placed = 0u32;
            for &at in cells {
                if placed >= count {
                    break;
                }
                if !self.can_place(side, archetype, at) {
                    continue;
                }
                if self.structure_points[side as usize] < cost {
                    break;
                }
                self.cell_mut(at).structure = Some(Structure {
                    side,
                    archetype,
                    upgraded: false,
                });
                self.structure_points[side as usize] -= cost;
                placed += 1;
            }
            placed
        }
    }

    /// Marks the structure at a cell as upgraded, charging its base cost
    /// again. Returns false if there is no upgradable structure or the
    /// owner cannot pay.
    pub fn upgrade_structure(&mut self, at: Coord) -> bool {
        if !at.is_valid() {
            return false;
        }
        let cost = match self.cell(at).structure {
            Some(s) if !s.upgraded => self.costs.cost(s.archetype),
            _ => return false,
        };
        let owner = self.cell(at).structure.map(|s| s.side).unwrap_or(Side::Own);
        if self.structure_points[owner as usize] < cost {
            return false;
        }
        self.structure_points[owner as usize] -= cost;
        if let Some(s) = &mut self.cell_mut(at).structure {
            s.upgraded = true;
        }
        true
    }

    /// Every placed unit with multiplicity, in row-major cell order.
    pub fn units(&self) -> impl Iterator<Item = (Coord, Occupant)> + '_ {
        all_cells().flat_map(move |at| {
            let cell = self.cell(at);
            let structure = cell.structure.map(|s| {
                (
                    at,
                    Occupant {
                        side: s.side,
                        archetype: s.archetype,
                    },
                )
            });
            let mobiles = [Side::Own, Side::Enemy].into_iter().flat_map(move |side| {
                MOBILE_ARCHETYPES.into_iter().flat_map(move |kind| {
                    let n = cell.mobile_count(side, kind) as usize;
                    std::iter::repeat((at, Occupant { side, archetype: kind })).take(n)
                })
            });
            structure.into_iter().chain(mobiles)
        })
    }

    /// Units occupying one cell, structure first.
    pub fn occupants_at(&self, at: Coord) -> Vec<Occupant> {
        if !at.is_valid() {
            return Vec::new();
        }
        self.units()
            .filter(|(c, _)| *c == at)
            .map(|(_, o)| o)
            .collect()
    }

    /// Number of stationary units of one archetype a side has placed.
    pub fn count_structures(&self, side: Side, archetype: Archetype) -> u32 {
        all_cells()
            .filter_map(|at| self.cell(at).structure)
            .filter(|s| s.side == side && s.archetype == archetype)
            .count() as u32
    }
}
