//! The narrow host-engine interface.
//!
//! The decision pipeline consumes the authoritative game engine through
//! [`HostLink`] only: side-indexed reads, best-effort placement writes,
//! one submit per turn, and the breach event feed. `Snapshot::capture`
//! assembles the pipeline's working copy through reads alone, so nothing
//! in the pipeline can mutate the authoritative state by accident.

pub mod local;

pub use local::LocalArena;

use crate::board::{all_cells, Archetype, Coord, CostTable, Occupant, Side, Snapshot, Structure, ALL_SIDES};
use crate::sim::Breach;

pub trait HostLink {
    fn mobile_points(&self, side: Side) -> f32;
    fn structure_points(&self, side: Side) -> f32;
    fn health(&self, side: Side) -> f32;
    fn turn_index(&self) -> u32;
    /// Units occupying a cell, stacked mobile units expanded.
    fn occupants(&self, at: Coord) -> Vec<Occupant>;
    fn is_stationary_occupied(&self, at: Coord) -> bool;
    /// Best-effort placement of our units; returns how many were placed.
    fn attempt_place(&mut self, archetype: Archetype, cells: &[Coord], count: u32) -> u32;
    /// Best-effort upgrade of one of our stationary units.
    fn attempt_upgrade(&mut self, at: Coord) -> bool;
    /// Commits the turn. Called exactly once per turn, after all
    /// placement and upgrade calls.
    fn submit_turn(&mut self);
    /// Breach events observed since the last drain, oldest first.
    fn drain_breaches(&mut self) -> Vec<Breach>;
}

impl Snapshot {
    /// Assembles a decision snapshot from host reads only.
    ///
    /// Upgrade state is not observable through `occupants`, so captured
    /// structures read as un-upgraded; the evaluator does not price
    /// upgrades, so the decision pipeline is unaffected.
    pub fn capture<H: HostLink + ?Sized>(host: &H, costs: CostTable) -> Snapshot {
        let mut snap = Snapshot::empty(costs);
        snap.turn = host.turn_index();
        for side in ALL_SIDES {
            snap.health[side as usize] = host.health(side);
            snap.mobile_points[side as usize] = host.mobile_points(side);
            snap.structure_points[side as usize] = host.structure_points(side);
        }
        for at in all_cells() {
            for occ in host.occupants(at) {
                if occ.archetype.is_mobile() {
                    snap.cell_mut(at).add_mobile(occ.side, occ.archetype, 1);
                } else {
                    snap.cell_mut(at).structure = Some(Structure {
                        side: occ.side,
                        archetype: occ.archetype,
                        upgraded: false,
                    });
                }
            }
        }
        snap
    }
}
