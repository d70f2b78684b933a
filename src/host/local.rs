//! In-process model arena.
//!
//! A deterministic stand-in for the real host engine, exposing the same
//! narrow interface over a plain [`Snapshot`]. `submit_turn` plays a
//! scripted enemy turn, resolves combat until the field is quiet, pays
//! income, and advances the turn counter. It exercises the whole
//! decision pipeline in tests and self-play without any host process;
//! its combat is the abstract resolution model, not the host's.

use crate::board::{
    all_cells, Archetype, Coord, CostTable, Occupant, Side, Snapshot, ALL_SIDES, MOBILE_ARCHETYPES,
};
use crate::host::HostLink;
use crate::phase::GamePhase;
use crate::plan::generate;
use crate::sim::{apply_action, resolve_step, Breach};

/// Resolution steps per submitted turn before stuck units expire.
const MAX_RESOLUTION_STEPS: u32 = 12;
/// Per-turn structure-point income.
const STRUCTURE_INCOME: f32 = 5.0;
/// Base per-turn mobile-point income; grows by one every ten turns.
const MOBILE_INCOME: f32 = 5.0;

pub struct LocalArena {
    snap: Snapshot,
    pending: Vec<Breach>,
    scripted_enemy: bool,
}

impl LocalArena {
    /// An arena with the built-in scripted enemy.
    pub fn new(costs: CostTable) -> LocalArena {
        LocalArena {
            snap: Snapshot::opening(costs),
            pending: Vec::new(),
            scripted_enemy: true,
        }
    }

    /// An arena whose enemy never acts. Tests use this to control every
    /// unit on the field.
    pub fn passive(costs: CostTable) -> LocalArena {
        LocalArena {
            scripted_enemy: false,
            ..LocalArena::new(costs)
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snap
    }

    /// Direct field access for crate tests that stage positions the
    /// placement interface cannot reach.
    #[cfg(test)]
    pub(crate) fn snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.snap
    }

    pub fn is_over(&self) -> bool {
        self.snap.is_terminal()
    }

    /// The winning side, once the match is decided. `None` while the
    /// match runs or when both sides fell in the same resolution.
    pub fn winner(&self) -> Option<Side> {
        let own_down = self.snap.health[Side::Own as usize] <= 0.0;
        let enemy_down = self.snap.health[Side::Enemy as usize] <= 0.0;
        match (own_down, enemy_down) {
            (false, true) => Some(Side::Own),
            (true, false) => Some(Side::Enemy),
            _ => None,
        }
    }

    /// Mirrored starter layout: two turrets, the front wall line, one
    /// support. Best effort, so already-built cells are skipped.
    fn enemy_core_defense(&mut self) {
        let turrets = [Coord::new(11, 11).mirrored(), Coord::new(16, 11).mirrored()];
        self.snap.place_units(Side::Enemy, Archetype::Turret, &turrets, 2);
        let mut walls = Vec::new();
        for x in 5..=9u8 {
            walls.push(Coord::new(x, 13).mirrored());
        }
        for x in 18..=22u8 {
            walls.push(Coord::new(x, 13).mirrored());
        }
        let count = walls.len() as u32;
        self.snap.place_units(Side::Enemy, Archetype::Wall, &walls, count);
        self.snap
            .place_units(Side::Enemy, Archetype::Support, &[Coord::new(3, 11).mirrored()], 1);
    }

    /// The enemy takes its own generator's top candidate.
    fn enemy_offense(&mut self) {
        let phase = GamePhase::classify(self.snap.turn);
        let candidates = generate(&self.snap, phase, Side::Enemy);
        if let Some(action) = candidates.first() {
            apply_action(&mut self.snap, Side::Enemy, action);
        }
    }

    fn mobiles_remain(&self) -> bool {
        all_cells().any(|at| {
            let cell = self.snap.cell(at);
            cell.mobile_total(Side::Own) > 0 || cell.mobile_total(Side::Enemy) > 0
        })
    }

    /// Stuck stacks (walled in) expire at end of turn.
    fn expire_mobiles(&mut self) {
        for at in all_cells() {
            for side in ALL_SIDES {
                for kind in MOBILE_ARCHETYPES {
                    self.snap.cell_mut(at).remove_mobile(side, kind, u32::MAX);
                }
            }
        }
    }
}

impl HostLink for LocalArena {
    fn mobile_points(&self, side: Side) -> f32 {
        self.snap.mobile_points[side as usize]
    }

    fn structure_points(&self, side: Side) -> f32 {
        self.snap.structure_points[side as usize]
    }

    fn health(&self, side: Side) -> f32 {
        self.snap.health[side as usize]
    }

    fn turn_index(&self) -> u32 {
        self.snap.turn
    }

    fn occupants(&self, at: Coord) -> Vec<Occupant> {
        self.snap.occupants_at(at)
    }

    fn is_stationary_occupied(&self, at: Coord) -> bool {
        at.is_valid() && self.snap.cell(at).structure.is_some()
    }

    fn attempt_place(&mut self, archetype: Archetype, cells: &[Coord], count: u32) -> u32 {
        self.snap.place_units(Side::Own, archetype, cells, count)
    }

    fn attempt_upgrade(&mut self, at: Coord) -> bool {
        if !at.is_valid() {
            return false;
        }
        match self.snap.cell(at).structure {
            Some(s) if s.side == Side::Own => self.snap.upgrade_structure(at),
            _ => false,
        }
    }

    fn submit_turn(&mut self) {
        if self.snap.is_terminal() {
            return;
        }
        if self.scripted_enemy {
            self.enemy_core_defense();
            self.enemy_offense();
        }
        for _ in 0..MAX_RESOLUTION_STEPS {
            if !self.mobiles_remain() || self.snap.is_terminal() {
                break;
            }
            let breaches = resolve_step(&mut self.snap);
            self.pending.extend(breaches);
        }
        self.expire_mobiles();
        let rate_bonus = (self.snap.turn / 10) as f32;
        for side in ALL_SIDES {
            self.snap.structure_points[side as usize] += STRUCTURE_INCOME;
            self.snap.mobile_points[side as usize] += MOBILE_INCOME + rate_bonus;
        }
        self.snap.turn += 1;
    }

    fn drain_breaches(&mut self) -> Vec<Breach> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_matches_the_simulator_path() {
        let mut arena = LocalArena::passive(CostTable::default());
        let mut snap = arena.snapshot().clone();
        let cells = [Coord::new(13, 0), Coord::new(14, 0)];

        let placed_arena = arena.attempt_place(Archetype::Scout, &cells, 8);
        let placed_snap = snap.place_units(Side::Own, Archetype::Scout, &cells, 8);

        assert_eq!(placed_arena, placed_snap);
        assert_eq!(arena.snapshot(), &snap);
    }

    #[test]
    fn submit_pays_income_and_advances_the_turn() {
        let mut arena = LocalArena::passive(CostTable::default());
        arena.submit_turn();
        let snap = arena.snapshot();
        assert_eq!(snap.turn, 1);
        assert_eq!(snap.structure_points, [45.0, 45.0]);
        assert_eq!(snap.mobile_points, [10.0, 10.0]);
    }

    #[test]
    fn mobile_income_rate_grows_every_ten_turns() {
        let mut arena = LocalArena::passive(CostTable::default());
        for _ in 0..10 {
            arena.submit_turn();
        }
        // Turns 0..9 pay 5.0 each.
        assert_eq!(arena.snapshot().mobile_points[Side::Own as usize], 55.0);
        arena.submit_turn();
        // Turn 10 pays 6.0.
        assert_eq!(arena.snapshot().mobile_points[Side::Own as usize], 61.0);
    }

    #[test]
    fn own_scout_wave_breaches_the_enemy_edge() {
        let mut arena = LocalArena::passive(CostTable::default());
        let placed = arena.attempt_place(
            Archetype::Scout,
            &[Coord::new(13, 0), Coord::new(14, 0)],
            5,
        );
        assert_eq!(placed, 5);
        arena.submit_turn();
        let breaches = arena.drain_breaches();
        assert_eq!(breaches.len(), 5);
        assert!(breaches.iter().all(|b| b.against == Side::Enemy));
        assert_eq!(arena.snapshot().health[Side::Enemy as usize], 25.0);
        assert!(arena.drain_breaches().is_empty(), "drain consumes the feed");
    }

    #[test]
    fn scripted_enemy_builds_its_mirrored_core() {
        let mut arena = LocalArena::new(CostTable::default());
        arena.submit_turn();
        let snap = arena.snapshot();
        for at in [Coord::new(11, 16), Coord::new(16, 16)] {
            let s = snap.cell(at).structure.unwrap();
            assert_eq!(s.side, Side::Enemy);
            assert_eq!(s.archetype, Archetype::Turret);
        }
        assert!(snap.count_structures(Side::Enemy, Archetype::Wall) >= 10);
        assert_eq!(snap.count_structures(Side::Enemy, Archetype::Support), 1);
    }

    #[test]
    fn scripted_enemy_attacks_with_its_top_candidate() {
        let mut arena = LocalArena::new(CostTable::default());
        // Enemy opens with 5.0 mobile points: an interceptor push of 2.
        // Undefended, the pair runs all the way through and scores on us.
        arena.submit_turn();
        let breaches = arena.drain_breaches();
        assert_eq!(breaches.len(), 2);
        assert!(breaches.iter().all(|b| b.against == Side::Own));
        assert_eq!(arena.snapshot().health[Side::Own as usize], 28.0);
        assert_eq!(arena.snapshot().mobile_points[Side::Enemy as usize], 8.0);
    }

    #[test]
    fn upgrades_are_own_structures_only() {
        let mut arena = LocalArena::new(CostTable::default());
        arena.attempt_place(Archetype::Turret, &[Coord::new(11, 11)], 1);
        assert!(arena.attempt_upgrade(Coord::new(11, 11)));
        arena.submit_turn();
        // The scripted enemy now owns (11,16); we cannot upgrade it.
        assert!(!arena.attempt_upgrade(Coord::new(11, 16)));
        assert!(!arena.attempt_upgrade(Coord::new(10, 5)), "empty cell");
    }

    #[test]
    fn passive_match_runs_to_our_win() {
        let mut arena = LocalArena::passive(CostTable::default());
        for _ in 0..40 {
            if arena.is_over() {
                break;
            }
            arena.attempt_place(
                Archetype::Scout,
                &[Coord::new(13, 0), Coord::new(14, 0)],
                8,
            );
            arena.submit_turn();
        }
        assert!(arena.is_over());
        assert_eq!(arena.winner(), Some(Side::Own));
    }

    #[test]
    fn submitting_after_the_end_changes_nothing() {
        let mut arena = LocalArena::passive(CostTable::default());
        while !arena.is_over() {
            arena.attempt_place(
                Archetype::Scout,
                &[Coord::new(13, 0), Coord::new(14, 0)],
                8,
            );
            arena.submit_turn();
        }
        let frozen = arena.snapshot().clone();
        arena.submit_turn();
        assert_eq!(arena.snapshot(), &frozen);
    }
}
