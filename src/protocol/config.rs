//! Host config decoding.
//!
//! The host describes unit metadata once per match in a JSON document.
//! Only the `unitInformation` array matters here: its order fixes the
//! archetype indexing (Wall, Support, Turret, Scout, Demolisher,
//! Interceptor), each entry naming a shorthand and its placement cost.

use serde::Deserialize;

use crate::board::{Archetype, CostTable, ALL_ARCHETYPES};

/// Default shorthands, in `unitInformation` order.
const DEFAULT_SHORTHANDS: [&str; 6] = ["FF", "EF", "DF", "PI", "EI", "SI"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unitInformation lists {0} unit kinds, expected at least 6")]
    MissingUnitKinds(usize),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUnitInfo {
    shorthand: Option<String>,
    cost1: Option<f32>,
    cost2: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(rename = "unitInformation")]
    unit_information: Vec<RawUnitInfo>,
}

/// Unit metadata taken from the host's config document.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub costs: CostTable,
    shorthands: [String; 6],
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            costs: CostTable::default(),
            shorthands: DEFAULT_SHORTHANDS.map(String::from),
        }
    }
}

impl GameConfig {
    /// Decodes a config document. Costs and shorthands the document
    /// omits keep their built-in defaults; stationary archetypes price
    /// from `cost1` (structure points), mobile from `cost2` (mobile
    /// points).
    pub fn from_json(raw: &str) -> Result<GameConfig, ConfigError> {
        let parsed: RawConfig = serde_json::from_str(raw)?;
        if parsed.unit_information.len() < ALL_ARCHETYPES.len() {
            return Err(ConfigError::MissingUnitKinds(parsed.unit_information.len()));
        }
        let mut config = GameConfig::default();
        for (i, archetype) in ALL_ARCHETYPES.iter().enumerate() {
            let info = &parsed.unit_information[i];
            let cost = if archetype.is_stationary() {
                info.cost1
            } else {
                info.cost2
            };
            if let Some(cost) = cost {
                config.costs.set_cost(*archetype, cost);
            }
            if let Some(short) = &info.shorthand {
                config.shorthands[i] = short.clone();
            }
        }
        Ok(config)
    }

    /// The archetype a frame shorthand names, if any.
    pub fn archetype_for(&self, shorthand: &str) -> Option<Archetype> {
        self.shorthands
            .iter()
            .position(|s| s == shorthand)
            .map(|i| ALL_ARCHETYPES[i])
    }

    pub fn shorthand(&self, archetype: Archetype) -> &str {
        &self.shorthands[archetype as usize]
    }
}
