//! Depth-limited minimax over candidate actions.
//!
//! Maximizing layers expand our candidates, minimizing layers the
//! mirrored enemy candidates, each through the simulator. Leaves are
//! scored by the heuristic evaluator; alpha-beta bounds prune dominated
//! branches. The deadline is checked only between root candidates, so an
//! expiry always leaves a valid best-so-far (the root list is ordered by
//! declared priority).

use std::io::Write;

use crate::board::{Side, Snapshot};
use crate::eval::{evaluate, WeightProfile};
use crate::phase::GamePhase;
use crate::plan::{generate, CandidateAction};
use crate::search::SearchParams;
use crate::sim::simulate;

/// Outcome of one root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: CandidateAction,
    pub score: f32,
    pub nodes: u64,
}

/// Picks the best offensive action for the current snapshot.
///
/// Emits `info` lines to `out` as root candidates complete. Never fails:
/// an empty candidate list yields `Pass`, and a deadline hit mid-scan
/// returns the best action found so far (ties keep the earliest, so the
/// highest-priority candidate survives an immediate expiry).
pub fn select_action<W: Write>(
    snap: &Snapshot,
    phase: GamePhase,
    weights: &WeightProfile,
    params: &SearchParams,
    out: &mut W,
) -> Decision {
    let candidates = generate(snap, phase, Side::Own);
    if candidates.is_empty() {
        let score = evaluate(snap, weights);
        let _ = writeln!(out, "info no candidates, passing");
        return Decision {
            action: CandidateAction::Pass,
            score,
            nodes: 0,
        };
    }

    let mut best = candidates[0];
    let mut best_score = f32::NEG_INFINITY;
    let mut nodes: u64 = 0;
    let mut alpha = f32::NEG_INFINITY;
    let beta = f32::INFINITY;
    let mut explored = 0usize;

    for &action in &candidates {
        if params.deadline.expired() {
            let _ = writeln!(
                out,
                "info deadline reached after {}/{} candidates",
                explored,
                candidates.len()
            );
            break;
        }
        let next = simulate(snap, &action, Side::Own);
        let score = minimax_value(
            &next,
            phase,
            params.depth.saturating_sub(1),
            alpha,
            beta,
            false,
            weights,
            &mut nodes,
        );
        let _ = writeln!(out, "info root {action} score {score:.2} nodes {nodes}");
        if score > best_score {
            best_score = score;
            best = action;
        }
        if score > alpha {
            alpha = score;
        }
        explored += 1;
    }

    if explored == 0 {
        // Nothing searched before expiry; report the static score.
        best_score = evaluate(snap, weights);
    }
    let _ = writeln!(
        out,
        "info depth {} best {} score {:.2} nodes {} time {}ms",
        params.depth,
        best,
        best_score,
        nodes,
        params.deadline.elapsed_ms()
    );
    Decision {
        action: best,
        score: best_score,
        nodes,
    }
}

#[allow(clippy::too_many_arguments)]
fn minimax_value(
    snap: &Snapshot,
    phase: GamePhase,
    depth: u8,
    mut alpha: f32,
    mut beta: f32,
    maximizing: bool,
    weights: &WeightProfile,
    nodes: &mut u64,
) -> f32 {
    *nodes += 1;
    if depth == 0 || snap.is_terminal() {
        return evaluate(snap, weights);
    }
    let side = if maximizing { Side::Own } else { Side::Enemy };
    let candidates = generate(snap, phase, side);
    if candidates.is_empty() {
        // A side with nothing to play passes; the branch is terminal.
        return evaluate(snap, weights);
    }
    if maximizing {
        let mut value = f32::NEG_INFINITY;
        for action in &candidates {
            let next = simulate(snap, action, side);
            let score =
                minimax_value(&next, phase, depth - 1, alpha, beta, false, weights, nodes);
            if score > value {
                value = score;
            }
            if value > alpha {
                alpha = value;
            }
            if alpha >= beta {
                break;
            }
        }
        value
    } else {
        let mut value = f32::INFINITY;
        for action in &candidates {
            let next = simulate(snap, action, side);
            let score =
                minimax_value(&next, phase, depth - 1, alpha, beta, true, weights, nodes);
            if score < value {
                value = score;
            }
            if value < beta {
                beta = value;
            }
            if alpha >= beta {
                break;
            }
        }
        value
    }
}
