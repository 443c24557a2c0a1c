//! Match simulation engine for a wrestling-promotion management game.
//!
//! The main entry point for step-based simulations is [`engine::MatchEngine`];
//! [`engine::run_match`] drives a whole bout against a set of collaborator
//! sinks. Persistence, UI and scheduling live behind the traits in [`sinks`].

pub mod batch;
pub mod commentary;
pub mod data;
pub mod engine;
pub mod match_logger;
pub mod sim;
pub mod sinks;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::batch::{compute_matchup_matrix, CellStats};
    pub use crate::engine::{run_match, MatchEngine, MatchSinks, TurnSummary};
    pub use crate::sim::bout::{FinishKind, MatchResult, MatchSnapshot, MatchState};
    pub use crate::sim::moves::{
        query_moves, Move, MoveCatalog, MoveKind, ProgressiveCatalog, WeightedCatalog,
    };
    pub use crate::sim::resolution::ExecutionGrade;
    pub use crate::sim::stats::{grade_for, CombatStats};
    pub use crate::sim::wrestler::{AttributeSheet, Finisher, Wrestler};
    pub use crate::sinks::{
        ColourSink, ExperienceSink, NarrationSink, NullSink, ResultSink, StatsSink, WrestlerStore,
    };
}
