use crate::sim::moves::MoveKind;
use crate::sim::wrestler::Competitor;
use rand::rngs::SmallRng;
use rand::Rng;

/// Two reversals can never land within this many turns of each other.
pub const REVERSAL_COOLDOWN: u32 = 3;

fn kind_bonus(kind: MoveKind) -> f32 {
    match kind {
        MoveKind::Strike => -0.05,
        MoveKind::Slam => 0.0,
        MoveKind::Grapple => 0.02,
        MoveKind::Submission => 0.05,
        MoveKind::Aerial => 0.08,
    }
}

/// Context-sensitive chance that the defender turns a failed move around.
/// Decays with match length, sinks with defender fatigue, rises with defender
/// quickness and with how exposed the attempted move leaves the attacker.
pub fn reversal_chance(turn: u32, defender: &Competitor, kind: MoveKind) -> f32 {
    let base = (0.5 - turn as f32 * 0.015).max(0.1);
    let fatigue_penalty = (1.0 - defender.stamina as f32 / 100.0) * 0.2;
    let dexterity_bonus = defender.wrestler.stats.dexterity as f32 / 200.0;
    base - fatigue_penalty + dexterity_bonus + kind_bonus(kind)
}

/// Invoked only on move failure. Does not swap roles itself; the orchestrator
/// owns the attacker/defender bookkeeping.
pub fn try_reversal(
    turn: u32,
    last_reversal_turn: u32,
    defender: &Competitor,
    kind: MoveKind,
    rng: &mut SmallRng,
) -> bool {
    if turn - last_reversal_turn < REVERSAL_COOLDOWN {
        return false;
    }
    rng.gen::<f32>() < reversal_chance(turn, defender, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::wrestler::{AttributeSheet, Finisher, Wrestler};
    use rand::SeedableRng;

    fn competitor() -> Competitor {
        let wrestler = Wrestler::new(
            1,
            "Test",
            AttributeSheet::default(),
            Finisher {
                name: "Test Driver".to_string(),
                style: MoveKind::Slam,
                damage: 14,
            },
            vec![],
        )
        .unwrap();
        Competitor::new(wrestler)
    }

    #[test]
    fn chance_decays_with_match_length() {
        let defender = competitor();
        let early = reversal_chance(2, &defender, MoveKind::Slam);
        let late = reversal_chance(30, &defender, MoveKind::Slam);
        assert!(early > late);
    }

    #[test]
    fn base_chance_floors_at_ten_percent() {
        let defender = competitor();
        // Fresh defender, neutral kind: only the floored base plus dex bonus.
        let chance = reversal_chance(100, &defender, MoveKind::Slam);
        assert!((chance - (0.1 + 10.0 / 200.0)).abs() < 1e-6);
    }

    #[test]
    fn fatigue_makes_reversals_harder() {
        let fresh = competitor();
        let mut gassed = competitor();
        gassed.drain_stamina(80);
        let kind = MoveKind::Grapple;
        assert!(reversal_chance(10, &fresh, kind) > reversal_chance(10, &gassed, kind));
    }

    #[test]
    fn aerial_moves_are_the_riskiest_to_throw() {
        let defender = competitor();
        let aerial = reversal_chance(10, &defender, MoveKind::Aerial);
        let strike = reversal_chance(10, &defender, MoveKind::Strike);
        assert!((aerial - strike - 0.13).abs() < 1e-6);
    }

    #[test]
    fn cooldown_blocks_back_to_back_reversals() {
        let defender = competitor();
        let mut rng = SmallRng::seed_from_u64(0);
        // last reversal on turn 8: turns 9 and 10 are locked out regardless of rolls
        assert!(!try_reversal(9, 8, &defender, MoveKind::Aerial, &mut rng));
        assert!(!try_reversal(10, 8, &defender, MoveKind::Aerial, &mut rng));
    }
}
