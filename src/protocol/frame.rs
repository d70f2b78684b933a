//! Turn-frame decoding.
//!
//! Each turn the host delivers one JSON document holding both players'
//! stats, every fielded unit keyed by shorthand, and the breach events
//! since our last move. `p1` is always us, `p2` the opponent. A frame
//! that fails to decode is an error for that turn only.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::board::{Coord, Side, Snapshot, Structure};
use crate::protocol::config::GameConfig;
use crate::sim::Breach;

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{section} holds {found} numbers, expected 3")]
    ShortStats {
        section: &'static str,
        found: usize,
    },

    #[error("coordinate ({x}, {y}) is outside the arena")]
    BadCoordinate { x: i64, y: i64 },

    #[error("breach entry is missing its location or spawner")]
    MalformedBreach,

    #[error("breach spawner index {0} is neither 1 nor 2")]
    BadSpawner(u64),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEvents {
    breach: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    turn: u32,
    #[serde(rename = "p1Stats")]
    p1_stats: Vec<f32>,
    #[serde(rename = "p2Stats")]
    p2_stats: Vec<f32>,
    #[serde(rename = "p1Units", default)]
    p1_units: BTreeMap<String, Vec<[i64; 2]>>,
    #[serde(rename = "p2Units", default)]
    p2_units: BTreeMap<String, Vec<[i64; 2]>>,
    #[serde(default)]
    events: RawEvents,
}

/// A decoded turn document: the position to plan against plus the
/// breach events the host reported with it.
#[derive(Debug)]
pub struct TurnFrame {
    pub snapshot: Snapshot,
    pub breaches: Vec<Breach>,
}

/// Decodes one turn document against a config's shorthands.
///
/// Stats triples read `[structure_points, mobile_points, health]`.
/// Duplicate unit coordinates stack; shorthands the config does not
/// know contribute nothing. Breach entries are index-addressed lists:
/// element 0 names the cell, element 4 the spawning player (1 us,
/// 2 opponent), so each breach counts against the spawner's opponent.
pub fn parse_frame(raw: &str, config: &GameConfig) -> Result<TurnFrame, FrameError> {
    let parsed: RawFrame = serde_json::from_str(raw)?;

    let mut snap = Snapshot::empty(config.costs);
    snap.turn = parsed.turn;
    apply_stats(&mut snap, Side::Own, "p1Stats", &parsed.p1_stats)?;
    apply_stats(&mut snap, Side::Enemy, "p2Stats", &parsed.p2_stats)?;
    apply_units(&mut snap, Side::Own, &parsed.p1_units, config)?;
    apply_units(&mut snap, Side::Enemy, &parsed.p2_units, config)?;

    let mut breaches = Vec::with_capacity(parsed.events.breach.len());
    for entry in &parsed.events.breach {
        breaches.push(decode_breach(entry)?);
    }

    Ok(TurnFrame {
        snapshot: snap,
        breaches,
    })
}

fn decode_breach(entry: &[Value]) -> Result<Breach, FrameError> {
    let cell = entry
        .first()
        .and_then(Value::as_array)
        .ok_or(FrameError::MalformedBreach)?;
    let (x, y) = match (cell.first(), cell.get(1)) {
        (Some(x), Some(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err(FrameError::MalformedBreach),
        },
        _ => return Err(FrameError::MalformedBreach),
    };
    let spawner = entry
        .get(4)
        .and_then(Value::as_u64)
        .ok_or(FrameError::MalformedBreach)?;
    let against = match spawner {
        1 => Side::Enemy,
        2 => Side::Own,
        other => return Err(FrameError::BadSpawner(other)),
    };
    Ok(Breach {
        at: coord(x, y)?,
        against,
    })
}

fn coord(x: i64, y: i64) -> Result<Coord, FrameError> {
    if !(0..=255).contains(&x) || !(0..=255).contains(&y) {
        return Err(FrameError::BadCoordinate { x, y });
    }
    let at = Coord::new(x as u8, y as u8);
    if !at.is_valid() {
        return Err(FrameError::BadCoordinate { x, y });
    }
    Ok(at)
}

fn apply_stats(
    snap: &mut Snapshot,
    side: Side,
    section: &'static str,
    stats: &[f32],
) -> Result<(), FrameError> {
    if stats.len() < 3 {
        return Err(FrameError::ShortStats {
            section,
            found: stats.len(),
        });
    }
    snap.structure_points[side as usize] = stats[0];
    snap.mobile_points[side as usize] = stats[1];
    snap.health[side as usize] = stats[2];
    Ok(())
}

fn apply_units(
    snap: &mut Snapshot,
    side: Side,
    units: &BTreeMap<String, Vec<[i64; 2]>>,
    config: &GameConfig,
) -> Result<(), FrameError> {
    for (shorthand, cells) in units {
        let archetype = match config.archetype_for(shorthand) {
            Some(archetype) => archetype,
            None => continue,
        };
        for &[x, y] in cells {
            let at = coord(x, y)?;
            if archetype.is_mobile() {
                snap.cell_mut(at).add_mobile(side, archetype, 1);
            } else {
                snap.cell_mut(at).structure = Some(Structure {
                    side,
                    archetype,
                    upgraded: false,
                });
            }
        }
    }
    Ok(())
}
