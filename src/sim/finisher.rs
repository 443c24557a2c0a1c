use crate::sim::moves::MoveKind;
use crate::sim::wrestler::Competitor;
use rand::rngs::SmallRng;
use rand::Rng;

/// Finisher attempts open up once the defender has absorbed this much damage.
pub fn damage_threshold(turn: u32) -> i32 {
    30 + (turn / 3) as i32
}

/// Attempt pacing: even a live finisher window only converts to an attempt on
/// a further independent roll, so the window can stay open across turns.
pub const ATTEMPT_PACING: f64 = 0.3;

/// Minimum stamina left to even hoist a finisher.
pub const FINISHER_STAMINA_GATE: i32 = 30;

/// Hold difficulty when a submission-style finisher enters the submission
/// contest (finishers carry no difficulty of their own).
pub const FINISHER_SUBMISSION_DIFFICULTY: i32 = 8;

/// Exhaustion finishes only become possible after this many turns.
pub const MIN_EXHAUSTION_TURN: u32 = 40;

/// Hard liveness cap: a match that somehow reaches this turn count is forced
/// to an exhaustion finish.
pub const MAX_TURNS: u32 = 120;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FinisherOutcome {
    /// Gate or pacing roll failed; nothing happened.
    NotAttempted,
    /// Match over: the finisher landed as a pin.
    Pinfall,
    /// Match over: the hold forced a tap-out.
    Submission,
    /// Near-fall or escape; momentum cleared, drama for the crowd.
    FalseFinish,
}

pub fn final_chance(turn: u32, attacker: &Competitor) -> f32 {
    let momentum_bonus = if attacker.momentum { 0.15 } else { 0.0 };
    let desperation_bonus = if attacker.stamina < 30 { 0.1 } else { 0.0 };
    let confidence_penalty = if attacker.damage_taken > 50 { 0.1 } else { 0.0 };
    (0.05 + turn as f32 * 0.015 + momentum_bonus + desperation_bonus - confidence_penalty).min(0.9)
}

/// Submission contest. The attacker wins outright only by beating both the
/// hold threshold and the defender's resistance; each escape costs the
/// defender stamina and diminishes the value of the next escape.
pub fn resolve_submission(
    attacker_intelligence: i32,
    defender_endurance: i32,
    submission_escapes: u32,
    difficulty: i32,
    rng: &mut SmallRng,
) -> bool {
    let attacker_score = attacker_intelligence as f32 + rng.gen_range(0.0..5.0);
    let defender_score = defender_endurance as f32 + rng.gen_range(0.0..5.0)
        - submission_escapes as f32 * 0.5;
    let threshold = (difficulty + 2) as f32;
    attacker_score > threshold && attacker_score > defender_score
}

/// Resolve one finisher window for the current attacker. Mutates momentum and
/// (on submission escapes) the defender's stamina/escape counter; the caller
/// records drama and false-finish counters from the returned outcome.
pub fn try_finisher(
    turn: u32,
    attacker: &mut Competitor,
    defender: &mut Competitor,
    rng: &mut SmallRng,
) -> FinisherOutcome {
    if attacker.stamina <= FINISHER_STAMINA_GATE {
        return FinisherOutcome::NotAttempted;
    }
    if rng.gen::<f32>() >= final_chance(turn, attacker) {
        return FinisherOutcome::NotAttempted;
    }
    if !rng.gen_bool(ATTEMPT_PACING) {
        return FinisherOutcome::NotAttempted;
    }
    if attacker.wrestler.finisher.style == MoveKind::Submission {
        let tapped = resolve_submission(
            attacker.wrestler.stats.intelligence,
            defender.wrestler.stats.endurance,
            defender.submission_escapes,
            FINISHER_SUBMISSION_DIFFICULTY,
            rng,
        );
        if tapped {
            return FinisherOutcome::Submission;
        }
        defender.submission_escapes += 1;
        defender.drain_stamina(3);
        attacker.momentum = false;
        FinisherOutcome::FalseFinish
    } else {
        let mut resistance = defender.wrestler.stats.endurance as f32
            + defender.stamina as f32
            - defender.damage_taken as f32
            + rng.gen_range(0.0..20.0);
        if attacker.momentum {
            resistance -= 5.0;
        }
        if resistance < 25.0 {
            return FinisherOutcome::Pinfall;
        }
        attacker.momentum = false;
        FinisherOutcome::FalseFinish
    }
}

/// Late-match safety valve: past the minimum turn, a fresh 10% roll ends the
/// match on the spot for whoever is on offense.
pub fn exhaustion_finish(turn: u32, rng: &mut SmallRng) -> bool {
    turn > MIN_EXHAUSTION_TURN && rng.gen_bool(0.1)
}
