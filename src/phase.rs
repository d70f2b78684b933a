//! Game phase classification.
//!
//! The decision pipeline coarsens the turn counter into three phases and
//! keys its evaluation weights and action gates off them. Classification
//! is a pure function of the turn number.

/// Broad stage of the match, derived from the turn counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GamePhase {
    Early = 0,
    Mid = 1,
    Late = 2,
}

pub const ALL_PHASES: [GamePhase; 3] = [GamePhase::Early, GamePhase::Mid, GamePhase::Late];

/// First turn of the mid game.
pub const MID_GAME_TURN: u32 = 10;
/// First turn of the late game.
pub const LATE_GAME_TURN: u32 = 25;

impl GamePhase {
    /// Classifies a turn number into its phase.
    pub const fn classify(turn: u32) -> GamePhase {
        if turn < MID_GAME_TURN {
            GamePhase::Early
        } else if turn < LATE_GAME_TURN {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GamePhase::Early => "early",
            GamePhase::Mid => "mid",
            GamePhase::Late => "late",
        }
    }
}
