//! Boundary contracts to the surrounding game: persistence, presentation and
//! the experience feedback loop. The engine only ever talks to these traits;
//! a failing sink is logged and swallowed, never allowed to take the match
//! result down with it.

use crate::sim::bout::{MatchResult, MatchSnapshot};
use crate::sim::wrestler::Wrestler;
use anyhow::Result;

/// Wrestler profile lookup, backed by the roster database in the full game.
pub trait WrestlerStore {
    fn load(&self, id: u32) -> Result<Wrestler>;
}

/// Per-turn play-by-play consumer. The engine never waits on the consumer;
/// callers wanting stepped presentation drive [`crate::engine::MatchEngine`]
/// turn by turn instead.
pub trait NarrationSink {
    fn emit(&mut self, line: &str, attacker_id: Option<u32>);
}

/// Periodic colour commentary consumer.
pub trait ColourSink {
    fn emit_colour(&mut self, line: &str);
}

/// Live running-totals consumer, fed after every resolved move.
pub trait StatsSink {
    fn emit_stats(&mut self, snapshot: &MatchSnapshot);
}

/// Final result consumer, called exactly once per match.
pub trait ResultSink {
    fn persist(&mut self, result: &MatchResult) -> Result<()>;
}

/// Per-move learning signal, called once per move-log entry after the match.
/// Implementations must tolerate being called many times per match.
pub trait ExperienceSink {
    fn record_move_outcome(&mut self, wrestler_id: u32, move_name: &str, success: bool)
        -> Result<()>;
}

/// No-op sinks for bulk/offline simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NarrationSink for NullSink {
    fn emit(&mut self, _line: &str, _attacker_id: Option<u32>) {}
}

impl ColourSink for NullSink {
    fn emit_colour(&mut self, _line: &str) {}
}

impl StatsSink for NullSink {
    fn emit_stats(&mut self, _snapshot: &MatchSnapshot) {}
}

impl ResultSink for NullSink {
    fn persist(&mut self, _result: &MatchResult) -> Result<()> {
        Ok(())
    }
}

impl ExperienceSink for NullSink {
    fn record_move_outcome(
        &mut self,
        _wrestler_id: u32,
        _move_name: &str,
        _success: bool,
    ) -> Result<()> {
        Ok(())
    }
}

/// Narration sink that buffers lines, for tests and replay capture.
#[derive(Clone, Debug, Default)]
pub struct VecNarration {
    pub lines: Vec<String>,
}

impl NarrationSink for VecNarration {
    fn emit(&mut self, line: &str, _attacker_id: Option<u32>) {
        self.lines.push(line.to_string());
    }
}
