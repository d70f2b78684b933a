//! Candidate offensive actions.
//!
//! Actions are pure data: target cells, unit counts, and a declared
//! priority. Nothing is placed until the simulator or the executor walks
//! an action's deployments. `Pass` is the sentinel returned by search
//! when no candidate exists; executing it places nothing.

use std::fmt;

use crate::board::{Archetype, Coord};

/// Scouts in a trailing wave behind an interceptor push.
pub const FOLLOW_UP_SCOUTS: u32 = 3;

/// One placement request derived from an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub archetype: Archetype,
    pub cells: Vec<Coord>,
    pub count: u32,
}

/// A candidate offensive action for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateAction {
    /// Cheap mass wave from the spawn-edge pair.
    ScoutRush { cells: [Coord; 2], count: u32 },
    /// Structure breakers from the rally cell.
    DemolisherPush { cell: Coord, count: u32 },
    /// Durable wave, optionally trailed by a scout follow-up.
    InterceptorPush {
        cells: [Coord; 2],
        count: u32,
        follow_up: bool,
    },
    /// Mid-game combined arms: interceptors screening demolishers.
    MixedAttack {
        interceptor_cells: [Coord; 2],
        interceptors: u32,
        demolisher_cell: Coord,
        demolishers: u32,
    },
    /// Do nothing this turn.
    Pass,
}

impl CandidateAction {
    /// Declared ordering weight; candidates sort descending by this.
    pub const fn priority(&self) -> u8 {
        match self {
            CandidateAction::InterceptorPush { .. } => 4,
            CandidateAction::DemolisherPush { .. } => 3,
            CandidateAction::ScoutRush { .. } => 2,
            CandidateAction::MixedAttack { .. } | CandidateAction::Pass => 0,
        }
    }

    pub const fn is_pass(&self) -> bool {
        matches!(self, CandidateAction::Pass)
    }

    /// The placement requests this action stands for, in spend order.
    pub fn deployments(&self) -> Vec<Deployment> {
        match *self {
            CandidateAction::ScoutRush { cells, count } => vec![Deployment {
                archetype: Archetype::Scout,
                cells: cells.to_vec(),
                count,
            }],
            CandidateAction::DemolisherPush { cell, count } => vec![Deployment {
                archetype: Archetype::Demolisher,
                cells: vec![cell],
                count,
            }],
            CandidateAction::InterceptorPush { cells, count, .. } => vec![Deployment {
                archetype: Archetype::Interceptor,
                cells: cells.to_vec(),
                count,
            }],
            CandidateAction::MixedAttack {
                interceptor_cells,
                interceptors,
                demolisher_cell,
                demolishers,
            } => vec![
                Deployment {
                    archetype: Archetype::Interceptor,
                    cells: interceptor_cells.to_vec(),
                    count: interceptors,
                },
                Deployment {
                    archetype: Archetype::Demolisher,
                    cells: vec![demolisher_cell],
                    count: demolishers,
                },
            ],
            CandidateAction::Pass => Vec::new(),
        }
    }

    /// The trailing scout wave, when this action requests one.
    pub fn follow_up_wave(&self) -> Option<Deployment> {
        match *self {
            CandidateAction::InterceptorPush {
                cells,
                follow_up: true,
                ..
            } => Some(Deployment {
                archetype: Archetype::Scout,
                cells: cells.to_vec(),
                count: FOLLOW_UP_SCOUTS,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for CandidateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateAction::ScoutRush { count, .. } => write!(f, "scout_rush x{count}"),
            CandidateAction::DemolisherPush { count, .. } => {
                write!(f, "demolisher_push x{count}")
            }
            CandidateAction::InterceptorPush {
                count, follow_up, ..
            } => {
                if *follow_up {
                    write!(f, "interceptor_push x{count}+scouts")
                } else {
                    write!(f, "interceptor_push x{count}")
                }
            }
            CandidateAction::MixedAttack {
                interceptors,
                demolishers,
                ..
            } => write!(f, "mixed_attack i{interceptors}/d{demolishers}"),
            CandidateAction::Pass => write!(f, "pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_pair() -> [Coord; 2] {
        [Coord::new(13, 0), Coord::new(14, 0)]
    }

    #[test]
    fn priority_ordering_matches_declared_table() {
        let rush = CandidateAction::ScoutRush { cells: edge_pair(), count: 4 };
        let push = CandidateAction::DemolisherPush { cell: Coord::new(24, 10), count: 1 };
        let inter = CandidateAction::InterceptorPush {
            cells: edge_pair(),
            count: 2,
            follow_up: false,
        };
        let mixed = CandidateAction::MixedAttack {
            interceptor_cells: edge_pair(),
            interceptors: 1,
            demolisher_cell: Coord::new(24, 10),
            demolishers: 1,
        };
        assert!(inter.priority() > push.priority());
        assert!(push.priority() > rush.priority());
        assert!(rush.priority() > mixed.priority());
        assert_eq!(CandidateAction::Pass.priority(), 0);
    }

    #[test]
    fn pass_deploys_nothing() {
        assert!(CandidateAction::Pass.deployments().is_empty());
        assert!(CandidateAction::Pass.follow_up_wave().is_none());
        assert!(CandidateAction::Pass.is_pass());
    }

    #[test]
    fn follow_up_is_three_scouts_at_the_same_cells() {
        let action = CandidateAction::InterceptorPush {
            cells: edge_pair(),
            count: 3,
            follow_up: true,
        };
        let wave = action.follow_up_wave().unwrap();
        assert_eq!(wave.archetype, Archetype::Scout);
        assert_eq!(wave.count, FOLLOW_UP_SCOUTS);
        assert_eq!(wave.cells, edge_pair().to_vec());

        let quiet = CandidateAction::InterceptorPush {
            cells: edge_pair(),
            count: 3,
            follow_up: false,
        };
        assert!(quiet.follow_up_wave().is_none());
    }

    #[test]
    fn mixed_attack_deploys_both_arms() {
        let action = CandidateAction::MixedAttack {
            interceptor_cells: edge_pair(),
            interceptors: 2,
            demolisher_cell: Coord::new(24, 10),
            demolishers: 1,
        };
        let deployments = action.deployments();
        assert_eq!(deployments.len(), 2);
        assert_eq!(deployments[0].archetype, Archetype::Interceptor);
        assert_eq!(deployments[1].archetype, Archetype::Demolisher);
        assert_eq!(deployments[1].cells, vec![Coord::new(24, 10)]);
    }

    #[test]
    fn display_is_compact() {
        let action = CandidateAction::InterceptorPush {
            cells: edge_pair(),
            count: 3,
            follow_up: true,
        };
        assert_eq!(action.to_string(), "interceptor_push x3+scouts");
        assert_eq!(CandidateAction::Pass.to_string(), "pass");
    }
}
