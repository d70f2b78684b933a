//! Heuristic position evaluation.
//!
//! Scores a snapshot from our perspective using handcrafted features:
//! health differential, mobile material advantage, forward map control,
//! resource differential, burst threat, and the opponent's banked
//! economy. Each feature is a pure function of the snapshot; the final
//! score is the weighted sum under a phase profile.
//!
//! Evaluation walks the cell grid directly and allocates nothing, so
//! search can call it at every leaf.

use crate::board::{all_cells, Archetype, Side, Snapshot, FAR_ROW, MOBILE_ARCHETYPES};
use crate::eval::weights::{unit_value, WeightProfile};

/// Forward momentum bonus per row of distance to the enemy edge.
const ADVANCE_BONUS_PER_ROW: f32 = 0.15;

/// Scores a snapshot from our perspective. Higher is better for us.
pub fn evaluate(snap: &Snapshot, weights: &WeightProfile) -> f32 {
    weights.health * health_difference(snap)
        + weights.unit_advantage * unit_advantage(snap)
        + weights.map_control * map_control(snap)
        + weights.resources * resource_difference(snap)
        + weights.burst_potential * burst_potential(snap)
        + weights.enemy_economy * enemy_economy(snap)
}

/// Our health minus theirs.
pub fn health_difference(snap: &Snapshot) -> f32 {
    snap.health[Side::Own as usize] - snap.health[Side::Enemy as usize]
}

/// Signed mobile material balance under [`unit_value`].
pub fn unit_advantage(snap: &Snapshot) -> f32 {
    let mut balance = 0.0;
    for at in all_cells() {
        let cell = snap.cell(at);
        for kind in MOBILE_ARCHETYPES {
            let own = cell.mobile_count(Side::Own, kind) as f32;
            let enemy = cell.mobile_count(Side::Enemy, kind) as f32;
            balance += (own - enemy) * unit_value(kind);
        }
    }
    balance
}

/// Mean forward progress of our mobile units, normalized to 0..=1.
///
/// A side with no mobile units on the field controls nothing.
pub fn map_control(snap: &Snapshot) -> f32 {
    let mut rows = 0.0f32;
    let mut count = 0u32;
    for at in all_cells() {
        let n = snap.cell(at).mobile_total(Side::Own);
        if n > 0 {
            rows += n as f32 * at.y as f32;
            count += n;
        }
    }
    if count == 0 {
        0.0
    } else {
        rows / (count as f32 * FAR_ROW as f32)
    }
}

/// Mobile-point differential, scaled down to the other features' range.
pub fn resource_difference(snap: &Snapshot) -> f32 {
    (snap.mobile_points[Side::Own as usize] - snap.mobile_points[Side::Enemy as usize]) / 10.0
}

/// Threat our fielded mobile units project toward the enemy edge.
///
/// Each unit contributes a per-kind base plus a bonus for every row it
/// still has to travel; a fresh wave at our edge is worth more than a
/// spent one deep in enemy territory.
pub fn burst_potential(snap: &Snapshot) -> f32 {
    let mut threat = 0.0f32;
    for at in all_cells() {
        let cell = snap.cell(at);
        for kind in MOBILE_ARCHETYPES {
            let n = cell.mobile_count(Side::Own, kind);
            if n == 0 {
                continue;
            }
            let base = match kind {
                Archetype::Scout => 1.0,
                Archetype::Demolisher => 4.0,
                _ => 2.0,
            };
            let advance = (FAR_ROW - at.y) as f32 * ADVANCE_BONUS_PER_ROW;
            threat += n as f32 * (base + advance);
        }
    }
    threat
}

/// The opponent's banked resources, both pools pooled.
///
/// Weighted negatively: an opponent sitting on a full bank is one turn
/// away from a large wave.
pub fn enemy_economy(snap: &Snapshot) -> f32 {
    (snap.mobile_points[Side::Enemy as usize] + snap.structure_points[Side::Enemy as usize]) / 5.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Archetype, Coord, CostTable};
    use crate::phase::GamePhase;

    fn opening() -> Snapshot {
        Snapshot::opening(CostTable::default())
    }

    #[test]
    fn empty_equal_snapshot_scores_zero() {
        let snap = Snapshot::empty(CostTable::default());
        let score = evaluate(&snap, &WeightProfile::default());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let mut snap = opening();
        snap.place_units(Side::Own, Archetype::Scout, &[Coord::new(13, 0)], 4);
        snap.place_units(Side::Enemy, Archetype::Demolisher, &[Coord::new(13, 27)], 1);
        let weights = WeightProfile::for_phase(GamePhase::Mid);
        let first = evaluate(&snap, &weights);
        for _ in 0..10 {
            assert_eq!(evaluate(&snap, &weights), first);
        }
    }

    #[test]
    fn health_lead_dominates() {
        let mut ahead = opening();
        ahead.health[Side::Enemy as usize] = 10.0;
        let mut behind = opening();
        behind.health[Side::Own as usize] = 10.0;
        let weights = WeightProfile::default();
        assert!(evaluate(&ahead, &weights) > 0.0);
        assert!(evaluate(&behind, &weights) < 0.0);
        assert!(evaluate(&ahead, &weights) > evaluate(&behind, &weights));
    }

    #[test]
    fn map_control_is_zero_without_mobiles() {
        let mut snap = opening();
        assert_eq!(map_control(&snap), 0.0);
        snap.place_units(Side::Own, Archetype::Turret, &[Coord::new(11, 11)], 1);
        assert_eq!(map_control(&snap), 0.0, "structures do not project control");
    }

    #[test]
    fn map_control_normalizes_by_far_row() {
        let mut snap = opening();
        snap.place_units(Side::Own, Archetype::Scout, &[Coord::new(13, 0)], 2);
        assert_eq!(map_control(&snap), 0.0);
        // Move the stack forward by hand.
        let mut forward = opening();
        forward.cell_mut(Coord::new(13, 13)).add_mobile(Side::Own, Archetype::Scout, 2);
        let control = map_control(&forward);
        assert!((control - 13.0 / 27.0).abs() < 1e-6);
    }

    #[test]
    fn burst_rewards_unlaunched_waves() {
        let mut at_edge = opening();
        at_edge.cell_mut(Coord::new(13, 0)).add_mobile(Side::Own, Archetype::Scout, 3);
        let mut deep = opening();
        deep.cell_mut(Coord::new(13, 20)).add_mobile(Side::Own, Archetype::Scout, 3);
        assert!(burst_potential(&at_edge) > burst_potential(&deep));
        let expected = 3.0 * (1.0 + 27.0 * ADVANCE_BONUS_PER_ROW);
        assert!((burst_potential(&at_edge) - expected).abs() < 1e-5);
    }

    #[test]
    fn enemy_bank_is_penalized() {
        let mut rich = opening();
        rich.mobile_points[Side::Enemy as usize] = 20.0;
        rich.structure_points[Side::Enemy as usize] = 30.0;
        let weights = WeightProfile::default();
        assert!(evaluate(&rich, &weights) < evaluate(&opening(), &weights));
        assert_eq!(enemy_economy(&rich), 10.0);
    }

    #[test]
    fn stationary_units_do_not_move_unit_advantage() {
        let mut snap = opening();
        snap.place_units(Side::Enemy, Archetype::Turret, &[Coord::new(11, 16)], 1);
        snap.place_units(Side::Enemy, Archetype::Wall, &[Coord::new(5, 14)], 1);
        assert_eq!(unit_advantage(&snap), 0.0);
        snap.place_units(Side::Own, Archetype::Interceptor, &[Coord::new(13, 0)], 2);
        assert!((unit_advantage(&snap) - 6.0).abs() < 1e-6);
    }
}
