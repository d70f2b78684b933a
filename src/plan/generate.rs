//! Candidate action generation.
//!
//! Each rule is gated independently on the acting side's mobile points
//! and the game phase; counts are derived from the pool and clamped to a
//! per-kind cap, so a generated action never asks for units the side
//! cannot begin to pay for. The result is sorted by descending priority
//! (stable, so earlier rules win ties) and truncated to the breadth cap.
//!
//! The enemy uses the identical rule set with mirrored target cells and
//! its own pool.

use crate::board::{Coord, Side, Snapshot};
use crate::phase::GamePhase;
use crate::plan::action::CandidateAction;

/// Most candidates considered per search node.
pub const MAX_CANDIDATES: usize = 4;

/// Spawn-edge pair for scout and interceptor waves.
const SPAWN_EDGE_PAIR: [Coord; 2] = [Coord::new(13, 0), Coord::new(14, 0)];
/// Rally cell for demolisher pushes.
const DEMOLISHER_RALLY: Coord = Coord::new(24, 10);

const SCOUT_RUSH_CAP: u32 = 8;
const DEMOLISHER_PUSH_CAP: u32 = 2;
const INTERCEPTOR_PUSH_CAP: u32 = 4;
const MIXED_INTERCEPTOR_CAP: u32 = 2;
const MIXED_DEMOLISHER_CAP: u32 = 1;

fn spawn_pair(side: Side) -> [Coord; 2] {
    match side {
        Side::Own => SPAWN_EDGE_PAIR,
        Side::Enemy => [SPAWN_EDGE_PAIR[0].mirrored(), SPAWN_EDGE_PAIR[1].mirrored()],
    }
}

fn rally_cell(side: Side) -> Coord {
    match side {
        Side::Own => DEMOLISHER_RALLY,
        Side::Enemy => DEMOLISHER_RALLY.mirrored(),
    }
}

/// Enumerates candidate offensive actions for `side`, best first.
pub fn generate(snap: &Snapshot, phase: GamePhase, side: Side) -> Vec<CandidateAction> {
    let mp = snap.mobile_points[side as usize];
    let mut out = Vec::with_capacity(MAX_CANDIDATES);

    if mp >= 2.0 && phase != GamePhase::Late {
        out.push(CandidateAction::ScoutRush {
            cells: spawn_pair(side),
            count: (mp.floor() as u32).min(SCOUT_RUSH_CAP),
        });
    }

    if mp >= 5.0 {
        out.push(CandidateAction::DemolisherPush {
            cell: rally_cell(side),
            count: ((mp / 5.0).floor() as u32).min(DEMOLISHER_PUSH_CAP),
        });
    }

    if mp >= 4.0 {
        out.push(CandidateAction::InterceptorPush {
            cells: spawn_pair(side),
            count: ((mp / 2.0).floor() as u32).min(INTERCEPTOR_PUSH_CAP),
            follow_up: mp >= 6.0,
        });
    }

    if mp >= 8.0 && phase == GamePhase::Mid {
        let interceptors = ((mp * 0.4 / 2.0).floor() as u32).min(MIXED_INTERCEPTOR_CAP);
        let demolishers = ((mp * 0.6 / 5.0).floor() as u32).min(MIXED_DEMOLISHER_CAP);
        // A mixed wave without both arms is not worth a search branch.
        if interceptors >= 1 && demolishers >= 1 {
            out.push(CandidateAction::MixedAttack {
                interceptor_cells: spawn_pair(side),
                interceptors,
                demolisher_cell: rally_cell(side),
                demolishers,
            });
        }
    }

    out.sort_by(|a, b| b.priority().cmp(&a.priority()));
    out.truncate(MAX_CANDIDATES);
    out
}
