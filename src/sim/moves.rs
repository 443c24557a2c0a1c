use crate::data::moves::builtin_moves;
use crate::sim::wrestler::Wrestler;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Strike,
    Slam,
    Grapple,
    Submission,
    Aerial,
}

impl MoveKind {
    pub const ALL: [MoveKind; 5] = [
        MoveKind::Strike,
        MoveKind::Slam,
        MoveKind::Grapple,
        MoveKind::Submission,
        MoveKind::Aerial,
    ];

    pub fn index(self) -> usize {
        match self {
            MoveKind::Strike => 0,
            MoveKind::Slam => 1,
            MoveKind::Grapple => 2,
            MoveKind::Submission => 3,
            MoveKind::Aerial => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoveKind::Strike => "strike",
            MoveKind::Slam => "slam",
            MoveKind::Grapple => "grapple",
            MoveKind::Submission => "submission",
            MoveKind::Aerial => "aerial",
        }
    }
}

/// A single offensive move. Immutable once selected for a turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub kind: MoveKind,
    pub damage: i32,
    pub difficulty: i32,
}

/// Damage/difficulty window that widens monotonically as the match progresses,
/// plateauing at turn 40.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Envelope {
    pub min_damage: i32,
    pub max_damage: i32,
    pub max_difficulty: i32,
}

impl Envelope {
    pub fn at(turn: u32) -> Self {
        let weight = (turn as f32 / 40.0).min(1.0);
        Self {
            min_damage: ((3.0 + 7.0 * weight).floor() as i32).max(1),
            max_damage: ((6.0 + 10.0 * weight).floor() as i32).min(16),
            max_difficulty: ((4.0 + 6.0 * weight).floor() as i32).min(10),
        }
    }

    pub fn admits(&self, mv: &Move) -> bool {
        mv.damage >= self.min_damage
            && mv.damage <= self.max_damage
            && mv.difficulty <= self.max_difficulty
    }
}

/// Random-eligible-move query over a move collection: the boundary contract
/// the full game's move database fulfils. Every filter is optional; `None`
/// means nothing matched.
pub fn query_moves(
    moves: &[Move],
    kind: Option<MoveKind>,
    damage_range: Option<(i32, i32)>,
    difficulty_max: Option<i32>,
    rng: &mut SmallRng,
) -> Option<Move> {
    let eligible: Vec<&Move> = moves
        .iter()
        .filter(|mv| kind.map_or(true, |wanted| mv.kind == wanted))
        .filter(|mv| {
            damage_range.map_or(true, |(low, high)| mv.damage >= low && mv.damage <= high)
        })
        .filter(|mv| difficulty_max.map_or(true, |cap| mv.difficulty <= cap))
        .collect();
    eligible.choose(rng).map(|mv| (*mv).clone())
}

/// Move selection strategy. The orchestrator treats the catalog as an external
/// queryable collection; `None` means the envelope matched nothing and the
/// caller substitutes [`fallback_move`] rather than failing the turn.
pub trait MoveCatalog: Send + Sync {
    fn pick(&self, turn: u32, attacker: &Wrestler, rng: &mut SmallRng) -> Option<Move>;
}

/// Uniformly random eligible move from the catalog.
#[derive(Clone, Debug)]
pub struct ProgressiveCatalog {
    moves: Vec<Move>,
}

impl Default for ProgressiveCatalog {
    fn default() -> Self {
        Self {
            moves: builtin_moves(),
        }
    }
}

impl ProgressiveCatalog {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }
}

impl MoveCatalog for ProgressiveCatalog {
    fn pick(&self, turn: u32, _attacker: &Wrestler, rng: &mut SmallRng) -> Option<Move> {
        let envelope = Envelope::at(turn);
        query_moves(
            &self.moves,
            None,
            Some((envelope.min_damage, envelope.max_damage)),
            Some(envelope.max_difficulty),
            rng,
        )
    }
}

/// Same envelope as [`ProgressiveCatalog`], but the move kind is first drawn
/// from a weight table built from the attacker's stats and the match phase.
#[derive(Clone, Debug)]
pub struct WeightedCatalog {
    moves: Vec<Move>,
}

impl Default for WeightedCatalog {
    fn default() -> Self {
        Self {
            moves: builtin_moves(),
        }
    }
}

impl WeightedCatalog {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }
}

impl MoveCatalog for WeightedCatalog {
    fn pick(&self, turn: u32, attacker: &Wrestler, rng: &mut SmallRng) -> Option<Move> {
        let envelope = Envelope::at(turn);
        let eligible: Vec<&Move> = self.moves.iter().filter(|mv| envelope.admits(mv)).collect();
        if eligible.is_empty() {
            return None;
        }
        let kind = draw_kind(kind_weights(turn, attacker), rng);
        let range = Some((envelope.min_damage, envelope.max_damage));
        let cap = Some(envelope.max_difficulty);
        if let Some(mv) = query_moves(&self.moves, Some(kind), range, cap, rng) {
            return Some(mv);
        }
        // Nothing of the preferred kind fits the window yet.
        eligible.choose(rng).map(|mv| (*mv).clone())
    }
}

fn kind_weights(turn: u32, attacker: &Wrestler) -> [i32; 5] {
    let stats = &attacker.stats;
    let mut weights = [10i32; 5];
    weights[MoveKind::Strike.index()] += (stats.strength + stats.dexterity) / 2;
    weights[MoveKind::Slam.index()] += stats.strength;
    weights[MoveKind::Grapple.index()] += (stats.strength + stats.intelligence) / 2;
    weights[MoveKind::Submission.index()] += (stats.intelligence + stats.endurance) / 2;
    weights[MoveKind::Aerial.index()] += stats.dexterity;
    let phase_kinds: [MoveKind; 2] = if turn <= 13 {
        [MoveKind::Strike, MoveKind::Grapple]
    } else if turn <= 26 {
        [MoveKind::Slam, MoveKind::Submission]
    } else {
        [MoveKind::Aerial, MoveKind::Slam]
    };
    for kind in phase_kinds {
        weights[kind.index()] *= 2;
    }
    weights
}

fn draw_kind(weights: [i32; 5], rng: &mut SmallRng) -> MoveKind {
    let total: i32 = weights.iter().sum();
    let mut roll = rng.gen_range(0..total);
    for kind in MoveKind::ALL {
        roll -= weights[kind.index()];
        if roll < 0 {
            return kind;
        }
    }
    MoveKind::Strike
}

/// Safe substitute when the envelope matches nothing: a basic hold every
/// worker can execute.
pub fn fallback_move() -> Move {
    Move {
        name: "Side Headlock".to_string(),
        kind: MoveKind::Grapple,
        damage: 3,
        difficulty: 1,
    }
}
