//! Adversarial search.
//!
//! Picks one offensive action per turn via depth-limited minimax with
//! alpha-beta pruning, under a wall-clock deadline checked at the root
//! candidate loop.

pub mod minimax;

pub use minimax::{select_action, Decision};

use std::time::{Duration, Instant};

/// Default lookahead depth in plies.
pub const DEFAULT_DEPTH: u8 = 3;

/// Wall-clock cutoff for one decision.
///
/// Built once per turn, read-only afterwards. Carries its start instant
/// so elapsed time can be reported; an unlimited deadline never expires.
/// `Deadline::after(Duration::ZERO)` is already expired, which is how
/// tests pin the expiry path without a clock.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    expires: Option<Instant>,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Deadline {
        let now = Instant::now();
        Deadline {
            started: now,
            expires: Some(now + budget),
        }
    }

    pub fn unlimited() -> Deadline {
        Deadline {
            started: Instant::now(),
            expires: None,
        }
    }

    pub fn expired(&self) -> bool {
        match self.expires {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// Tunable inputs for one root search.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u8,
    pub deadline: Deadline,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            depth: DEFAULT_DEPTH,
            deadline: Deadline::unlimited(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_is_born_expired() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.expired());
    }

    #[test]
    fn unlimited_never_expires() {
        let deadline = Deadline::unlimited();
        assert!(!deadline.expired());
    }

    #[test]
    fn generous_budget_is_not_expired_yet() {
        let deadline = Deadline::after(Duration::from_secs(3600));
        assert!(!deadline.expired());
    }
}
