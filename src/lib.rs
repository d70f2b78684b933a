//! Sortie decision engine library.
//!
//! Exposes the board representation, evaluation, action planning,
//! simulation, search, and host-interface modules for use by
//! integration tests and the self-play binary.

pub mod agent;
pub mod board;
pub mod defense;
pub mod eval;
pub mod host;
pub mod phase;
pub mod plan;
pub mod protocol;
pub mod search;
pub mod sim;

pub use agent::{Agent, TurnReport};
pub use board::Snapshot;
pub use host::{HostLink, LocalArena};
pub use phase::GamePhase;
pub use protocol::GameConfig;
