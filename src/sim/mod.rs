pub mod bout;
pub mod finisher;
pub mod moves;
pub mod resolution;
pub mod reversal;
pub mod scoring;
pub mod stats;
pub mod wrestler;

pub use bout::{FinishKind, MatchResult, MatchState};
pub use wrestler::Wrestler;
