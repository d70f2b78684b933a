//! Host document handling.
//!
//! The match host speaks JSON: a one-time config document carrying unit
//! metadata, and a per-turn frame carrying stats, fielded units, and
//! breach events. This module decodes both into the crate's own types.

pub mod config;
pub mod frame;

pub use config::{ConfigError, GameConfig};
pub use frame::{parse_frame, FrameError, TurnFrame};
