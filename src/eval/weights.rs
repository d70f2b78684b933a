//! Phase-keyed evaluation weights.
//!
//! Each phase gets its own [`WeightProfile`], rebuilt from the baseline
//! every time it is requested. Profiles are never merged or mutated in
//! place, so a phase transition can never leak a stale override into the
//! next phase.

use crate::board::Archetype;
use crate::phase::GamePhase;

/// Feature weights for the state evaluator.
///
/// The struct is closed: every feature the evaluator computes has a
/// field here, so a missing weight is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightProfile {
    pub health: f32,
    pub unit_advantage: f32,
    pub map_control: f32,
    pub resources: f32,
    pub burst_potential: f32,
    pub enemy_economy: f32,
    /// Multiplier applied to offensive unit counts at execution time,
    /// not an evaluation feature.
    pub push_strength: f32,
}

impl Default for WeightProfile {
    fn default() -> Self {
        WeightProfile {
            health: 10.0,
            unit_advantage: 2.0,
            map_control: 1.5,
            resources: 0.8,
            burst_potential: 3.5,
            enemy_economy: -3.0,
            push_strength: 1.0,
        }
    }
}

impl WeightProfile {
    /// Builds the profile for a phase from the baseline.
    pub fn for_phase(phase: GamePhase) -> WeightProfile {
        let mut profile = WeightProfile::default();
        match phase {
            GamePhase::Early => {
                profile.health = 8.0;
                profile.burst_potential = 4.0;
                profile.enemy_economy = -2.0;
                profile.push_strength = 1.2;
            }
            GamePhase::Mid => {
                profile.health = 10.0;
                profile.unit_advantage = 2.5;
                profile.map_control = 1.5;
                profile.push_strength = 1.0;
            }
            GamePhase::Late => {
                profile.health = 12.0;
                profile.burst_potential = 5.0;
                profile.enemy_economy = -4.0;
                profile.push_strength = 1.5;
            }
        }
        profile
    }
}

/// Material value of a unit for the advantage feature.
///
/// Stationary archetypes are worth nothing here; their contribution is
/// captured through health and economy instead.
pub const fn unit_value(archetype: Archetype) -> f32 {
    match archetype {
        Archetype::Scout => 0.8,
        Archetype::Demolisher => 2.5,
        Archetype::Interceptor => 3.0,
        Archetype::Wall | Archetype::Support | Archetype::Turret => 0.0,
    }
}
