use crate::sim::moves::MoveKind;
use crate::sim::stats::CombatStats;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Canonical five-bucket execution grading, used for live lines, crowd deltas
/// and the final scoring model alike.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionGrade {
    Botched,
    Okay,
    Great,
    Fantastic,
    Perfect,
}

impl ExecutionGrade {
    pub fn from_score(execution: f32) -> Self {
        if execution < 0.2 {
            ExecutionGrade::Botched
        } else if execution < 0.5 {
            ExecutionGrade::Okay
        } else if execution < 0.7 {
            ExecutionGrade::Great
        } else if execution < 0.9 {
            ExecutionGrade::Fantastic
        } else {
            ExecutionGrade::Perfect
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExecutionGrade::Botched => "botched",
            ExecutionGrade::Okay => "okay",
            ExecutionGrade::Great => "great",
            ExecutionGrade::Fantastic => "fantastic",
            ExecutionGrade::Perfect => "perfect",
        }
    }
}

/// Histogram of execution grades across every resolved move of a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExecutionBuckets {
    pub botched: u32,
    pub okay: u32,
    pub great: u32,
    pub fantastic: u32,
    pub perfect: u32,
}

impl ExecutionBuckets {
    pub fn record(&mut self, grade: ExecutionGrade) {
        match grade {
            ExecutionGrade::Botched => self.botched += 1,
            ExecutionGrade::Okay => self.okay += 1,
            ExecutionGrade::Great => self.great += 1,
            ExecutionGrade::Fantastic => self.fantastic += 1,
            ExecutionGrade::Perfect => self.perfect += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.botched + self.okay + self.great + self.fantastic + self.perfect
    }
}

/// Outcome of one move attempt.
#[derive(Clone, Copy, Debug)]
pub struct Resolution {
    pub success: bool,
    pub execution: f32,
    pub chance: f32,
}

impl Resolution {
    pub fn grade(&self) -> ExecutionGrade {
        ExecutionGrade::from_score(self.execution)
    }
}

/// Which stats carry a move of the given kind.
fn skill_for(stats: &CombatStats, kind: MoveKind) -> f32 {
    match kind {
        MoveKind::Strike => (stats.strength + stats.dexterity) as f32 / 2.0,
        MoveKind::Slam => stats.strength as f32,
        MoveKind::Grapple => (stats.strength + stats.intelligence) as f32 / 2.0,
        MoveKind::Aerial => stats.dexterity as f32,
        MoveKind::Submission => (stats.intelligence + stats.endurance) as f32 / 2.0,
    }
}

pub fn success_chance(stats: &CombatStats, kind: MoveKind, difficulty: i32) -> f32 {
    let skill = skill_for(stats, kind);
    let normalized = ((skill - 5.0) / 15.0).clamp(0.0, 1.0);
    (0.3 + normalized * 0.6 - difficulty as f32 * 0.03).clamp(0.05, 0.95)
}

/// Execution quality peaks when the roll lands exactly at the success
/// threshold and degrades with distance from it in either direction.
pub fn execution_score(chance: f32, roll: f32) -> f32 {
    ((chance - (roll - chance).abs()) / chance).clamp(0.0, 1.0)
}

pub fn resolve(
    stats: &CombatStats,
    kind: MoveKind,
    difficulty: i32,
    rng: &mut SmallRng,
) -> Resolution {
    let chance = success_chance(stats, kind, difficulty);
    let roll = rng.gen::<f32>();
    Resolution {
        success: roll < chance,
        execution: execution_score(chance, roll),
        chance,
    }
}
