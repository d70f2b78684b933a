//! Turn orchestration.
//!
//! [`Agent`] runs the full decision cycle against a host: capture the
//! position, classify the phase, search the candidate actions, execute
//! the pick, run the scripted defense, submit. The only state carried
//! between turns is the append-only breach list and the stall RNG; the
//! weight profile is rebuilt from the phase every turn.

use std::io::Write;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Coord, Side, Snapshot};
use crate::defense;
use crate::eval::WeightProfile;
use crate::host::HostLink;
use crate::phase::GamePhase;
use crate::plan::CandidateAction;
use crate::protocol::{parse_frame, GameConfig};
use crate::search::{self, Deadline, SearchParams};
use crate::sim::Breach;

/// Wall-clock budget for one decision when none is configured.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(2000);

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("info sink write failed: {0}")]
    Sink(#[from] std::io::Error),
}

/// What one committed decision cycle did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnReport {
    pub turn: u32,
    pub phase: GamePhase,
    pub action: CandidateAction,
    pub score: f32,
    pub nodes: u64,
}

pub struct Agent {
    config: GameConfig,
    depth: u8,
    time_budget: Option<Duration>,
    scored_on: Vec<Coord>,
    rng: SmallRng,
}

impl Agent {
    pub fn new(config: GameConfig) -> Agent {
        Agent::with_search(config, search::DEFAULT_DEPTH, Some(DEFAULT_TIME_BUDGET))
    }

    /// An agent with explicit search depth and time budget. `None`
    /// searches without a deadline.
    pub fn with_search(config: GameConfig, depth: u8, time_budget: Option<Duration>) -> Agent {
        Agent {
            config,
            depth,
            time_budget,
            scored_on: Vec::new(),
            rng: SmallRng::seed_from_u64(0),
        }
    }

    /// Reseeds the stall RNG, for reproducible matches.
    pub fn with_seed(mut self, seed: u64) -> Agent {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Cells the opponent has scored on so far, oldest first.
    pub fn scored_on(&self) -> &[Coord] {
        &self.scored_on
    }

    /// Runs one decision cycle against the host and commits it.
    pub fn play_turn<H, W>(&mut self, host: &mut H, out: &mut W) -> Result<TurnReport, TurnError>
    where
        H: HostLink + ?Sized,
        W: Write,
    {
        let snap = Snapshot::capture(host, self.config.costs);
        let turn = snap.turn;
        let phase = GamePhase::classify(turn);
        let weights = WeightProfile::for_phase(phase);
        let params = SearchParams {
            depth: self.depth,
            deadline: match self.time_budget {
                Some(budget) => Deadline::after(budget),
                None => Deadline::unlimited(),
            },
        };

        let decision = search::select_action(&snap, phase, &weights, &params, out);
        execute(&decision.action, weights.push_strength, host);
        defense::shore_up(host, &self.scored_on, &mut self.rng);
        host.submit_turn();
        let breaches = host.drain_breaches();
        self.absorb_breaches(&breaches);

        writeln!(
            out,
            "info turn {} phase {} played {} score {:.2} nodes {}",
            turn,
            phase.name(),
            decision.action,
            decision.score,
            decision.nodes
        )?;
        Ok(TurnReport {
            turn,
            phase,
            action: decision.action,
            score: decision.score,
            nodes: decision.nodes,
        })
    }

    /// Plays a turn from a raw host frame.
    ///
    /// Breach events the document reports against us are recorded before
    /// the cycle runs, so this turn's reactive defense already covers
    /// them. A document that fails to decode costs only the offense:
    /// the error is logged, defense and submit still run, and the turn
    /// reports a pass.
    pub fn play_frame<H, W>(
        &mut self,
        raw: &str,
        host: &mut H,
        out: &mut W,
    ) -> Result<TurnReport, TurnError>
    where
        H: HostLink + ?Sized,
        W: Write,
    {
        match parse_frame(raw, &self.config) {
            Ok(frame) => {
                self.absorb_breaches(&frame.breaches);
                self.play_turn(host, out)
            }
            Err(err) => {
                writeln!(out, "info frame rejected: {err}")?;
                let turn = host.turn_index();
                defense::shore_up(host, &self.scored_on, &mut self.rng);
                host.submit_turn();
                Ok(TurnReport {
                    turn,
                    phase: GamePhase::classify(turn),
                    action: CandidateAction::Pass,
                    score: 0.0,
                    nodes: 0,
                })
            }
        }
    }

    fn absorb_breaches(&mut self, breaches: &[Breach]) {
        for breach in breaches {
            if breach.against == Side::Own {
                self.scored_on.push(breach.at);
            }
        }
    }
}

/// Applies a chosen action through the host, scaling every deployment
/// count by the profile's push strength (rounded down). Follow-up waves
/// go out unscaled.
pub fn execute<H: HostLink + ?Sized>(action: &CandidateAction, push: f32, host: &mut H) -> u32 {
    let mut placed = 0;
    for dep in action.deployments() {
        let scaled = (dep.count as f32 * push).floor() as u32;
        if scaled == 0 {
            continue;
        }
        placed += host.attempt_place(dep.archetype, &dep.cells, scaled);
    }
    if let Some(wave) = action.follow_up_wave() {
        placed += host.attempt_place(wave.archetype, &wave.cells, wave.count);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Archetype, CostTable};
    use crate::host::LocalArena;

    fn quick_agent() -> Agent {
        Agent::with_search(GameConfig::default(), 2, None).with_seed(0xA5)
    }

    fn sink_text(sink: Vec<u8>) -> String {
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn executor_scales_counts_by_push_strength() {
        let mut arena = LocalArena::passive(CostTable::default());
        arena.snapshot_mut().mobile_points[Side::Own as usize] = 20.0;

        let action = CandidateAction::ScoutRush {
            cells: [Coord::new(13, 0), Coord::new(14, 0)],
            count: 4,
        };
        assert_eq!(execute(&action, 1.5, &mut arena), 6);
        let snap = arena.snapshot();
        let scouts: u32 = [Coord::new(13, 0), Coord::new(14, 0)]
            .iter()
            .map(|&at| snap.cell(at).mobile_count(Side::Own, Archetype::Scout))
            .sum();
        assert_eq!(scouts, 6);
    }

    #[test]
    fn follow_up_wave_is_never_scaled() {
        let mut arena = LocalArena::passive(CostTable::default());
        arena.snapshot_mut().mobile_points[Side::Own as usize] = 20.0;

        let action = CandidateAction::InterceptorPush {
            cells: [Coord::new(13, 0), Coord::new(14, 0)],
            count: 2,
            follow_up: true,
        };
        // 2 interceptors doubled, plus exactly 3 scouts
        assert_eq!(execute(&action, 2.0, &mut arena), 7);
        let snap = arena.snapshot();
        let scouts: u32 = [Coord::new(13, 0), Coord::new(14, 0)]
            .iter()
            .map(|&at| snap.cell(at).mobile_count(Side::Own, Archetype::Scout))
            .sum();
        assert_eq!(scouts, 3);
    }

    #[test]
    fn pass_places_nothing() {
        let mut arena = LocalArena::passive(CostTable::default());
        assert_eq!(execute(&CandidateAction::Pass, 1.5, &mut arena), 0);
        assert_eq!(arena.snapshot().mobile_points[Side::Own as usize], 5.0);
    }

    #[test]
    fn play_turn_commits_and_reports() {
        let mut arena = LocalArena::new(CostTable::default());
        let mut agent = quick_agent();
        let mut sink = Vec::new();

        let report = agent.play_turn(&mut arena, &mut sink).unwrap();
        assert_eq!(report.turn, 0);
        assert_eq!(report.phase, GamePhase::Early);
        assert_eq!(arena.snapshot().turn, 1);

        let text = sink_text(sink);
        assert!(text.contains("info turn 0 phase early"));
        // the scripted core went up alongside the searched action
        assert!(arena.snapshot().cell(Coord::new(11, 11)).structure.is_some());
    }

    #[test]
    fn breach_list_only_grows() {
        let mut arena = LocalArena::new(CostTable::default());
        let mut agent = quick_agent();
        let mut sink = Vec::new();

        let mut seen = Vec::new();
        for _ in 0..6 {
            if arena.is_over() {
                break;
            }
            agent.play_turn(&mut arena, &mut sink).unwrap();
            let now = agent.scored_on().to_vec();
            assert!(now.len() >= seen.len());
            assert_eq!(&now[..seen.len()], &seen[..]);
            seen = now;
        }
    }

    #[test]
    fn rejected_frame_still_defends_and_submits() {
        let mut arena = LocalArena::passive(CostTable::default());
        let mut agent = quick_agent();
        let mut sink = Vec::new();

        let report = agent.play_frame("{", &mut arena, &mut sink).unwrap();
        assert_eq!(report.action, CandidateAction::Pass);
        assert_eq!(report.nodes, 0);
        assert_eq!(arena.snapshot().turn, 1);
        assert!(arena.snapshot().cell(Coord::new(11, 11)).structure.is_some());
        assert!(sink_text(sink).contains("frame rejected"));
    }

    #[test]
    fn frame_breaches_feed_the_reactive_defense() {
        let mut arena = LocalArena::passive(CostTable::default());
        let mut agent = quick_agent();
        let mut sink = Vec::new();

        let raw = r#"{
            "turn": 0,
            "p1Stats": [40.0, 5.0, 28.0],
            "p2Stats": [40.0, 5.0, 30.0],
            "events": {"breach": [[[20, 6], 1.0, 3, "11", 2]]}
        }"#;
        agent.play_frame(raw, &mut arena, &mut sink).unwrap();

        assert_eq!(agent.scored_on(), &[Coord::new(20, 6)]);
        let built = arena.snapshot().cell(Coord::new(20, 7)).structure.unwrap();
        assert_eq!(built.archetype, Archetype::Turret);
    }
}
