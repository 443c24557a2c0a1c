//! Colour-commentary line bank.
//!
//! Lines are grouped by context label and crowd tier, with `(wrestler1)` /
//! `(wrestler2)` placeholders substituted at emit time. A lookup that matches
//! nothing falls back to a stock control line rather than going silent.

use once_cell::sync::Lazy;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

type LineBank = HashMap<String, HashMap<String, Vec<String>>>;

static LINE_BANK: Lazy<LineBank> = Lazy::new(|| {
    serde_json::from_str(include_str!("../data/commentary.json"))
        .expect("Failed to parse data/commentary.json")
});

/// Crowd tier used to pick a commentary register.
pub fn crowd_tier(crowd_energy: i32) -> &'static str {
    if crowd_energy >= 70 {
        "hot"
    } else if crowd_energy < 30 {
        "cold"
    } else {
        "neutral"
    }
}

fn substitute(line: &str, wrestler1: &str, wrestler2: &str) -> String {
    line.replace("(wrestler1)", wrestler1)
        .replace("(wrestler2)", wrestler2)
}

/// One line from the bank for the given context and tier, names substituted.
pub fn colour_line(
    context: &str,
    tier: &str,
    wrestler1: &str,
    wrestler2: &str,
    rng: &mut SmallRng,
) -> String {
    let picked = LINE_BANK
        .get(context)
        .and_then(|tiers| tiers.get(tier))
        .and_then(|lines| lines.choose(rng));
    match picked {
        Some(line) => substitute(line, wrestler1, wrestler2),
        None => format!("{wrestler1} is in control!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn placeholders_are_substituted() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..20 {
            let line = colour_line("colour", "hot", "Ace Crusher", "Gran Paloma", &mut rng);
            assert!(!line.contains("(wrestler1)"));
            assert!(!line.contains("(wrestler2)"));
        }
    }

    #[test]
    fn unknown_context_falls_back_to_the_stock_line() {
        let mut rng = SmallRng::seed_from_u64(2);
        let line = colour_line("entrances", "hot", "Ace Crusher", "Gran Paloma", &mut rng);
        assert_eq!(line, "Ace Crusher is in control!");
    }

    #[test]
    fn tier_tracks_crowd_energy() {
        assert_eq!(crowd_tier(85), "hot");
        assert_eq!(crowd_tier(70), "hot");
        assert_eq!(crowd_tier(50), "neutral");
        assert_eq!(crowd_tier(29), "cold");
        assert_eq!(crowd_tier(0), "cold");
    }
}
