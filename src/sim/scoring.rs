//! Post-match quality model: converts the accumulated match signals into a
//! single 0-100 rating with bounded randomness.

use crate::sim::resolution::ExecutionBuckets;
use rand::rngs::SmallRng;
use rand::Rng;

/// Signals accumulated by the orchestrator, consumed once at match end.
#[derive(Clone, Copy, Debug)]
pub struct ScoreSignals {
    pub match_quality_score: i32,
    pub kinds_used: u32,
    pub winner_charisma: i32,
    pub buckets: ExecutionBuckets,
    pub drama_score: i32,
    pub crowd_energy: i32,
    pub flow_streak: u32,
    pub had_highlight: bool,
}

fn meets_perfect_gate(signals: &ScoreSignals) -> bool {
    signals.drama_score >= 20
        && signals.buckets.perfect >= 3
        && signals.crowd_energy >= 85
        && signals.had_highlight
        && signals.flow_streak >= 3
}

/// Final rating in [10, 100]. A 99-100 requires every quality signal at once
/// (the perfect gate), not just a high weighted sum.
pub fn score(signals: &ScoreSignals, rng: &mut SmallRng) -> i32 {
    let base = signals.match_quality_score as f32 * 0.6;
    let variety_bonus = signals.kinds_used as f32 * 3.0;
    let charisma_bonus = signals.winner_charisma as f32 * 0.6;
    let crowd_bias = rng.gen_range(-5..=5) as f32;
    let botch_penalty = if signals.buckets.botched >= 3 { -5.0 } else { 0.0 };
    let mut drama = signals.drama_score as f32;
    if drama > 20.0 {
        drama -= (drama - 20.0) * 0.5;
    }
    let expectation_penalty = if signals.crowd_energy > 90 {
        ((signals.crowd_energy - 90) / 5) as f32
    } else {
        0.0
    };
    let flow_bonus = if signals.flow_streak >= 3 { 2.0 } else { 0.0 };
    let highlight_bonus = if signals.had_highlight { 2.0 } else { 0.0 };
    let clinical_penalty =
        if signals.drama_score < 5 && signals.match_quality_score > 80 { -3.0 } else { 0.0 };

    let total = base + variety_bonus + charisma_bonus + crowd_bias + botch_penalty + drama
        + flow_bonus
        + highlight_bonus
        + clinical_penalty
        - expectation_penalty;
    let mut quality = total.floor() as i32;

    // One-in-a-thousand all-timer.
    if quality >= 95 && rng.gen_bool(0.001) {
        quality += 4;
    }
    if quality > 98 && !meets_perfect_gate(signals) {
        quality = 98;
    }
    quality.clamp(10, 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn empty_signals() -> ScoreSignals {
        ScoreSignals {
            match_quality_score: 0,
            kinds_used: 0,
            winner_charisma: 0,
            buckets: ExecutionBuckets::default(),
            drama_score: 0,
            crowd_energy: 0,
            flow_streak: 0,
            had_highlight: false,
        }
    }

    fn loaded_signals() -> ScoreSignals {
        ScoreSignals {
            match_quality_score: 140,
            kinds_used: 5,
            winner_charisma: 20,
            buckets: ExecutionBuckets {
                botched: 0,
                okay: 2,
                great: 8,
                fantastic: 10,
                perfect: 6,
            },
            drama_score: 28,
            crowd_energy: 88,
            flow_streak: 5,
            had_highlight: true,
        }
    }

    #[test]
    fn adversarial_inputs_floor_at_ten() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..200 {
            assert_eq!(score(&empty_signals(), &mut rng), 10);
        }
    }

    #[test]
    fn quality_never_leaves_the_band() {
        let mut rng = SmallRng::seed_from_u64(2);
        let extreme = ScoreSignals {
            match_quality_score: 10_000,
            kinds_used: 5,
            winner_charisma: 20,
            drama_score: 500,
            crowd_energy: 100,
            ..loaded_signals()
        };
        for _ in 0..500 {
            let quality = score(&extreme, &mut rng);
            assert!((10..=100).contains(&quality));
        }
    }

    #[test]
    fn perfect_gate_holds_when_any_signal_is_missing() {
        let mut rng = SmallRng::seed_from_u64(3);
        let hot = ScoreSignals {
            match_quality_score: 200,
            ..loaded_signals()
        };
        let spoiled = [
            ScoreSignals { drama_score: 19, ..hot },
            ScoreSignals {
                buckets: ExecutionBuckets { perfect: 2, ..hot.buckets },
                ..hot
            },
            ScoreSignals { crowd_energy: 84, ..hot },
            ScoreSignals { had_highlight: false, ..hot },
            ScoreSignals { flow_streak: 2, ..hot },
        ];
        for signals in spoiled {
            for _ in 0..300 {
                assert!(score(&signals, &mut rng) <= 98);
            }
        }
    }

    #[test]
    fn perfect_rating_is_reachable_with_every_signal_lit() {
        let mut rng = SmallRng::seed_from_u64(4);
        let hot = ScoreSignals {
            match_quality_score: 200,
            ..loaded_signals()
        };
        let best = (0..300).map(|_| score(&hot, &mut rng)).max().unwrap();
        assert!(best >= 99, "best {best}");
    }

    #[test]
    fn drama_is_diminished_above_twenty() {
        let mut rng_a = SmallRng::seed_from_u64(5);
        let mut rng_b = SmallRng::seed_from_u64(5);
        let base = ScoreSignals {
            match_quality_score: 30,
            drama_score: 20,
            ..loaded_signals()
        };
        let inflated = ScoreSignals {
            drama_score: 40,
            ..base
        };
        // Same rng stream: the 20 extra drama points are worth only 10.
        let low = score(&base, &mut rng_a);
        let high = score(&inflated, &mut rng_b);
        assert_eq!(high - low, 10);
    }

    #[test]
    fn molten_crowd_raises_expectations() {
        let mut rng_a = SmallRng::seed_from_u64(6);
        let mut rng_b = SmallRng::seed_from_u64(6);
        let base = ScoreSignals {
            match_quality_score: 40,
            crowd_energy: 90,
            ..loaded_signals()
        };
        let scalding = ScoreSignals {
            crowd_energy: 100,
            ..base
        };
        let cooler = score(&base, &mut rng_a);
        let hotter = score(&scalding, &mut rng_b);
        assert_eq!(cooler - hotter, 2);
    }

    #[test]
    fn clinical_matches_lose_points() {
        let mut rng_a = SmallRng::seed_from_u64(7);
        let mut rng_b = SmallRng::seed_from_u64(7);
        let sterile = ScoreSignals {
            match_quality_score: 90,
            drama_score: 0,
            crowd_energy: 60,
            flow_streak: 0,
            had_highlight: false,
            buckets: ExecutionBuckets::default(),
            kinds_used: 2,
            winner_charisma: 10,
        };
        let warmer = ScoreSignals {
            drama_score: 5,
            ..sterile
        };
        let cold = score(&sterile, &mut rng_a);
        let warm = score(&warmer, &mut rng_b);
        // 5 drama points plus the dropped clinical penalty.
        assert_eq!(warm - cold, 8);
    }
}
