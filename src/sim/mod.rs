//! Snapshot simulation.
//!
//! `simulate` produces the hypothetical successor state search explores:
//! clone the snapshot, run the action's deployments through the shared
//! best-effort allocator, then advance one abstract resolution step. The
//! authoritative state is never touched.
//!
//! The resolution model is a deterministic approximation of the host's
//! combat, not a replica: mobile units advance by a per-archetype stride
//! and stop in front of structures, units crossing the far edge breach
//! for one health each, turrets volley a bounded number of kills, and
//! demolishers take out the nearest structure ahead. The same step drives
//! the local arena so simulated and executed turns agree.

use crate::board::{
    all_cells, Archetype, Coord, Side, Snapshot, ALL_SIDES, GRID_SIZE, MOBILE_ARCHETYPES,
};
use crate::plan::CandidateAction;

/// Turret engagement radius (Chebyshev rows/columns).
pub(crate) const TURRET_RANGE: i16 = 3;
/// Kills per turret per resolution step.
const TURRET_VOLLEY: u32 = 2;
/// Kills per upgraded turret per resolution step.
const TURRET_VOLLEY_UPGRADED: u32 = 3;
/// How many rows ahead a demolisher can reach a structure.
const DEMOLISH_REACH: u8 = 4;

/// A mobile unit crossing the far edge, scoring against `against`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breach {
    pub at: Coord,
    pub against: Side,
}

/// Places an action's units into a snapshot, best effort.
pub(crate) fn apply_action(snap: &mut Snapshot, side: Side, action: &CandidateAction) -> u32 {
    let mut placed = 0;
    for dep in action.deployments() {
        placed += snap.place_units(side, dep.archetype, &dep.cells, dep.count);
    }
    if let Some(wave) = action.follow_up_wave() {
        placed += snap.place_units(side, wave.archetype, &wave.cells, wave.count);
    }
    placed
}

/// Hypothetical successor state after `side` takes `action`.
pub fn simulate(snap: &Snapshot, action: &CandidateAction, side: Side) -> Snapshot {
    let mut next = snap.clone();
    apply_action(&mut next, side, action);
    resolve_step(&mut next);
    next
}

/// Advances the arena one abstract combat step.
///
/// Order: all mobile units advance (breaches included), turrets volley,
/// surviving demolishers demolish. Returns the breach events in the order
/// they occurred.
pub fn resolve_step(snap: &mut Snapshot) -> Vec<Breach> {
    let breaches = advance_mobiles(snap);
    turret_volleys(snap);
    demolitions(snap);
    breaches
}

/// Where a stack starting at `from` ends up after one stride, or `None`
/// if it exits the arena (a breach).
fn advance_target(snap: &Snapshot, from: Coord, side: Side, stride: u8) -> Option<Coord> {
    let step: i16 = match side {
        Side::Own => 1,
        Side::Enemy => -1,
    };
    let mut cur = from;
    for _ in 0..stride {
        let ny = cur.y as i16 + step;
        if ny < 0 || ny >= GRID_SIZE as i16 {
            return None;
        }
        let next = Coord::new(from.x, ny as u8);
        if !next.is_valid() {
            // Walked off the narrowing diamond: that is the far edge.
            return None;
        }
        if snap.cell(next).structure.is_some() {
            break;
        }
        cur = next;
    }
    Some(cur)
}

fn advance_mobiles(snap: &mut Snapshot) -> Vec<Breach> {
    let mut breaches = Vec::new();
    // Collect every stack's move first so nothing advances twice.
    let mut moves: Vec<(Coord, Side, Archetype, u32, Option<Coord>)> = Vec::new();
    for at in all_cells() {
        for side in ALL_SIDES {
            for kind in MOBILE_ARCHETYPES {
                let n = snap.cell(at).mobile_count(side, kind);
                if n == 0 {
                    continue;
                }
                let dest = advance_target(snap, at, side, kind.stride());
                moves.push((at, side, kind, n, dest));
            }
        }
    }
    for (from, side, kind, n, dest) in moves {
        snap.cell_mut(from).remove_mobile(side, kind, n);
        match dest {
            Some(to) => snap.cell_mut(to).add_mobile(side, kind, n),
            None => {
                let against = side.opponent();
                snap.health[against as usize] -= n as f32;
                for _ in 0..n {
                    breaches.push(Breach { at: from, against });
                }
            }
        }
    }
    breaches
}

/// The cheapest enemy mobile unit within a turret's range, if any.
fn cheapest_target(snap: &Snapshot, turret: Coord, enemy: Side) -> Option<(Coord, Archetype)> {
    let mut best: Option<(f32, u8, Coord, Archetype)> = None;
    for dy in -TURRET_RANGE..=TURRET_RANGE {
        for dx in -TURRET_RANGE..=TURRET_RANGE {
            let x = turret.x as i16 + dx;
            let y = turret.y as i16 + dy;
            if x < 0 || y < 0 || x >= GRID_SIZE as i16 || y >= GRID_SIZE as i16 {
                continue;
            }
            let at = Coord::new(x as u8, y as u8);
            if !at.is_valid() {
                continue;
            }
            for kind in MOBILE_ARCHETYPES {
                if snap.cell(at).mobile_count(enemy, kind) == 0 {
                    continue;
                }
                let cost = snap.costs.cost(kind);
                let slot = kind as u8;
                let better = match &best {
                    None => true,
                    Some((bc, bs, _, _)) => match cost.total_cmp(bc) {
                        std::cmp::Ordering::Less => true,
                        std::cmp::Ordering::Equal => slot < *bs,
                        std::cmp::Ordering::Greater => false,
                    },
                };
                if better {
                    best = Some((cost, slot, at, kind));
                }
            }
        }
    }
    best.map(|(_, _, at, kind)| (at, kind))
}

fn turret_volleys(snap: &mut Snapshot) {
    let turrets: Vec<(Coord, Side, bool)> = all_cells()
        .filter_map(|at| snap.cell(at).structure.map(|s| (at, s)))
        .filter(|(_, s)| s.archetype == Archetype::Turret)
        .map(|(at, s)| (at, s.side, s.upgraded))
        .collect();
    for (at, side, upgraded) in turrets {
        let enemy = side.opponent();
        let mut shots = if upgraded { TURRET_VOLLEY_UPGRADED } else { TURRET_VOLLEY };
        while shots > 0 {
            match cheapest_target(snap, at, enemy) {
                Some((target, kind)) => {
                    snap.cell_mut(target).remove_mobile(enemy, kind, 1);
                    shots -= 1;
                }
                None => break,
            }
        }
    }
}

fn demolitions(snap: &mut Snapshot) {
    let mut stacks: Vec<(Coord, Side, u32)> = Vec::new();
    for at in all_cells() {
        for side in ALL_SIDES {
            let n = snap.cell(at).mobile_count(side, Archetype::Demolisher);
            if n > 0 {
                stacks.push((at, side, n));
            }
        }
    }
    for (at, side, n) in stacks {
        let step: i16 = match side {
            Side::Own => 1,
            Side::Enemy => -1,
        };
        let enemy = side.opponent();
        for _ in 0..n {
            for ahead in 1..=DEMOLISH_REACH as i16 {
                let y = at.y as i16 + step * ahead;
                if y < 0 || y >= GRID_SIZE as i16 {
                    break;
                }
                let target = Coord::new(at.x, y as u8);
                if !target.is_valid() {
                    break;
                }
                if let Some(s) = snap.cell(target).structure {
                    if s.side == enemy {
                        snap.cell_mut(target).structure = None;
                        break;
                    }
                }
            }
        }
    }
}
