//! High-level match engine for step-based simulations.
//!
//! The caller pulls one turn at a time with [`MatchEngine::advance_turn`] and
//! paces presentation however it likes; the simulation never waits on a
//! consumer. [`run_to_end`](MatchEngine::run_to_end) drains the remaining
//! turns in one call; issuing it mid-match is the "finish quickly" signal,
//! and it cannot change the outcome because every random draw happens inside
//! `advance_turn` regardless of pacing.

use crate::match_logger::MatchLogger;
use crate::sim::bout::{build_result, execute_turn, MatchResult, MatchSnapshot, MatchState};
use crate::sim::moves::{MoveCatalog, ProgressiveCatalog};
use crate::sim::wrestler::Wrestler;
use crate::sinks::{ColourSink, ExperienceSink, NarrationSink, ResultSink, StatsSink};
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Result of a single engine step.
#[derive(Clone, Debug)]
pub struct TurnSummary {
    /// Turn number this step simulated.
    pub turn: u32,
    /// Play-by-play lines for the turn.
    pub events: Vec<String>,
    /// Colour commentary, present on the fixed cadence.
    pub colour: Option<String>,
    /// Running totals after the turn.
    pub snapshot: MatchSnapshot,
    /// Terminal result if the match ended on this turn.
    pub outcome: Option<MatchResult>,
}

/// Step-based match engine for external callers (UI layers, batch tooling).
pub struct MatchEngine {
    state: MatchState,
    catalog: Box<dyn MoveCatalog>,
    rng: SmallRng,
    outcome: Option<MatchResult>,
}

impl MatchEngine {
    /// Create an engine over the built-in catalog with uniform selection.
    pub fn new(wrestler_a: Wrestler, wrestler_b: Wrestler, seed: u64) -> Self {
        Self::with_catalog(
            wrestler_a,
            wrestler_b,
            seed,
            Box::new(ProgressiveCatalog::default()),
        )
    }

    pub fn with_catalog(
        wrestler_a: Wrestler,
        wrestler_b: Wrestler,
        seed: u64,
        catalog: Box<dyn MoveCatalog>,
    ) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = MatchState::new(wrestler_a, wrestler_b, &mut rng);
        state.logger = Some(MatchLogger::new());
        Self {
            state,
            catalog,
            rng,
            outcome: None,
        }
    }

    /// Advance the match by one turn. Calling past the end returns a terminal
    /// summary with the finished outcome and no new events.
    pub fn advance_turn(&mut self) -> TurnSummary {
        if let Some(outcome) = self.outcome.clone() {
            return TurnSummary {
                turn: self.state.turn,
                events: vec![format!("terminal: {} by {}", outcome.winner, outcome.finish.label())],
                colour: None,
                snapshot: self.state.snapshot(),
                outcome: Some(outcome),
            };
        }
        let turn = self.state.turn;
        let record = execute_turn(&mut self.state, self.catalog.as_ref(), &mut self.rng);
        if record.finish.is_some() {
            self.outcome = Some(build_result(&self.state, &mut self.rng));
        }
        TurnSummary {
            turn,
            events: record.lines,
            colour: record.colour,
            snapshot: self.state.snapshot(),
            outcome: self.outcome.clone(),
        }
    }

    /// Drain the remaining turns without pausing; the "finish quickly" path.
    pub fn run_to_end(&mut self) -> MatchResult {
        while self.outcome.is_none() {
            self.advance_turn();
        }
        self.outcome.clone().expect("loop exits only with an outcome")
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Access the internal match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn outcome(&self) -> Option<&MatchResult> {
        self.outcome.as_ref()
    }

    /// The structured pipe-format log accumulated so far.
    pub fn log_lines(&self) -> &[String] {
        self.state
            .logger
            .as_ref()
            .map(|logger| logger.log_lines())
            .unwrap_or(&[])
    }
}

/// Optional collaborator set for [`run_match`].
#[derive(Default)]
pub struct MatchSinks<'a> {
    pub narration: Option<&'a mut dyn NarrationSink>,
    pub colour: Option<&'a mut dyn ColourSink>,
    pub stats: Option<&'a mut dyn StatsSink>,
    pub result: Option<&'a mut dyn ResultSink>,
    pub experience: Option<&'a mut dyn ExperienceSink>,
}

/// Drive a whole match against the given sinks, then dispatch the result and
/// the per-move experience feedback. Sink failures are logged and swallowed;
/// the result is always returned.
pub fn run_match(
    wrestler_a: Wrestler,
    wrestler_b: Wrestler,
    seed: u64,
    catalog: Box<dyn MoveCatalog>,
    sinks: &mut MatchSinks,
) -> MatchResult {
    let mut engine = MatchEngine::with_catalog(wrestler_a, wrestler_b, seed, catalog);
    loop {
        let summary = engine.advance_turn();
        let attacker_id = engine.state().attacker().wrestler.id;
        if let Some(narration) = sinks.narration.as_mut() {
            for line in &summary.events {
                narration.emit(line, Some(attacker_id));
            }
        }
        if let (Some(colour_sink), Some(line)) = (sinks.colour.as_mut(), summary.colour.as_ref()) {
            colour_sink.emit_colour(line);
        }
        if let Some(stats) = sinks.stats.as_mut() {
            stats.emit_stats(&summary.snapshot);
        }
        if let Some(result) = summary.outcome {
            if let Some(result_sink) = sinks.result.as_mut() {
                if let Err(error) = result_sink.persist(&result) {
                    warn!("result sink failed: {error:#}");
                }
            }
            if let Some(experience) = sinks.experience.as_mut() {
                for entry in &engine.state().move_log {
                    if let Err(error) = experience.record_move_outcome(
                        entry.wrestler_id,
                        &entry.move_name,
                        entry.success,
                    ) {
                        warn!(
                            "experience sink failed for {} / {}: {error:#}",
                            entry.wrestler_id, entry.move_name
                        );
                    }
                }
            }
            return result;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::moves::MoveKind;
    use crate::sim::wrestler::{AttributeSheet, Finisher};
    use crate::sinks::{NullSink, VecNarration};

    fn wrestler(id: u32, name: &str) -> Wrestler {
        Wrestler::new(
            id,
            name,
            AttributeSheet::default(),
            Finisher {
                name: "Closer".to_string(),
                style: MoveKind::Slam,
                damage: 14,
            },
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn stepping_and_draining_agree_on_the_outcome() {
        let seed = 77;
        let mut stepped = MatchEngine::new(wrestler(1, "Ace"), wrestler(2, "Bear"), seed);
        // Step a handful of turns "on screen", then finish quickly.
        for _ in 0..5 {
            stepped.advance_turn();
        }
        let stepped_result = stepped.run_to_end();

        let mut drained = MatchEngine::new(wrestler(1, "Ace"), wrestler(2, "Bear"), seed);
        let drained_result = drained.run_to_end();

        assert_eq!(stepped_result.winner, drained_result.winner);
        assert_eq!(stepped_result.quality, drained_result.quality);
        assert_eq!(stepped_result.turns, drained_result.turns);
    }

    #[test]
    fn advancing_past_the_end_is_a_terminal_no_op() {
        let mut engine = MatchEngine::new(wrestler(1, "Ace"), wrestler(2, "Bear"), 5);
        let result = engine.run_to_end();
        let log_len = engine.log_lines().len();
        let summary = engine.advance_turn();
        assert_eq!(summary.outcome.unwrap().winner, result.winner);
        assert_eq!(engine.log_lines().len(), log_len);
    }

    #[test]
    fn run_match_feeds_the_narration_sink() {
        let mut narration = VecNarration::default();
        let mut result_sink = NullSink;
        let mut sinks = MatchSinks {
            narration: Some(&mut narration),
            result: Some(&mut result_sink),
            ..MatchSinks::default()
        };
        let result = run_match(
            wrestler(1, "Ace"),
            wrestler(2, "Bear"),
            13,
            Box::new(ProgressiveCatalog::default()),
            &mut sinks,
        );
        assert!(!narration.lines.is_empty());
        assert!(narration
            .lines
            .iter()
            .any(|line| line.contains(&result.winner)));
    }
}
