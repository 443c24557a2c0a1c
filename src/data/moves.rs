//! Built-in move catalog, keyed by normalized lowercase id.
//!
//! Coverage rule: for every damage value in [3, 16] there is at least one move
//! whose difficulty fits the progressive envelope at the earliest turn that
//! damage value becomes legal, so the envelope never comes up empty.

use crate::sim::moves::{Move, MoveKind};
use phf::phf_map;

pub struct MoveData {
    pub name: &'static str,
    pub kind: MoveKind,
    pub damage: i32,
    pub difficulty: i32,
}

impl MoveData {
    pub fn to_move(&self) -> Move {
        Move {
            name: self.name.to_string(),
            kind: self.kind,
            damage: self.damage,
            difficulty: self.difficulty,
        }
    }
}

pub static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    "armdrag" => MoveData { name: "Arm Drag", kind: MoveKind::Grapple, damage: 3, difficulty: 1 },
    "sideheadlock" => MoveData { name: "Side Headlock", kind: MoveKind::Grapple, damage: 3, difficulty: 1 },
    "knifeedgechop" => MoveData { name: "Knife-Edge Chop", kind: MoveKind::Strike, damage: 3, difficulty: 1 },
    "headlocktakeover" => MoveData { name: "Headlock Takeover", kind: MoveKind::Grapple, damage: 3, difficulty: 2 },
    "wristlock" => MoveData { name: "Wristlock", kind: MoveKind::Submission, damage: 3, difficulty: 2 },
    "bodyslam" => MoveData { name: "Body Slam", kind: MoveKind::Slam, damage: 4, difficulty: 2 },
    "forearmsmash" => MoveData { name: "Forearm Smash", kind: MoveKind::Strike, damage: 4, difficulty: 1 },
    "snapmare" => MoveData { name: "Snapmare", kind: MoveKind::Grapple, damage: 4, difficulty: 2 },
    "armwringer" => MoveData { name: "Arm Wringer", kind: MoveKind::Submission, damage: 4, difficulty: 2 },
    "hiptoss" => MoveData { name: "Hip Toss", kind: MoveKind::Grapple, damage: 5, difficulty: 2 },
    "scoopslam" => MoveData { name: "Scoop Slam", kind: MoveKind::Slam, damage: 5, difficulty: 2 },
    "europeanuppercut" => MoveData { name: "European Uppercut", kind: MoveKind::Strike, damage: 5, difficulty: 2 },
    "chinlock" => MoveData { name: "Chin Lock", kind: MoveKind::Submission, damage: 5, difficulty: 3 },
    "dropkick" => MoveData { name: "Dropkick", kind: MoveKind::Aerial, damage: 5, difficulty: 3 },
    "verticalsuplex" => MoveData { name: "Vertical Suplex", kind: MoveKind::Slam, damage: 6, difficulty: 3 },
    "russianlegsweep" => MoveData { name: "Russian Leg Sweep", kind: MoveKind::Grapple, damage: 6, difficulty: 3 },
    "kneelift" => MoveData { name: "Knee Lift", kind: MoveKind::Strike, damage: 6, difficulty: 2 },
    "armbar" => MoveData { name: "Arm Bar", kind: MoveKind::Submission, damage: 6, difficulty: 3 },
    "crossbody" => MoveData { name: "Crossbody", kind: MoveKind::Aerial, damage: 6, difficulty: 4 },
    "backsuplex" => MoveData { name: "Back Suplex", kind: MoveKind::Slam, damage: 7, difficulty: 3 },
    "spinningheelkick" => MoveData { name: "Spinning Heel Kick", kind: MoveKind::Strike, damage: 7, difficulty: 4 },
    "abdominalstretch" => MoveData { name: "Abdominal Stretch", kind: MoveKind::Submission, damage: 7, difficulty: 4 },
    "swingingneckbreaker" => MoveData { name: "Swinging Neckbreaker", kind: MoveKind::Grapple, damage: 7, difficulty: 4 },
    "ddt" => MoveData { name: "DDT", kind: MoveKind::Grapple, damage: 8, difficulty: 4 },
    "bellytobellysuplex" => MoveData { name: "Belly-to-Belly Suplex", kind: MoveKind::Slam, damage: 8, difficulty: 4 },
    "bigboot" => MoveData { name: "Big Boot", kind: MoveKind::Strike, damage: 8, difficulty: 3 },
    "bostoncrab" => MoveData { name: "Boston Crab", kind: MoveKind::Submission, damage: 8, difficulty: 5 },
    "missiledropkick" => MoveData { name: "Missile Dropkick", kind: MoveKind::Aerial, damage: 8, difficulty: 5 },
    "lariat" => MoveData { name: "Lariat", kind: MoveKind::Strike, damage: 9, difficulty: 4 },
    "powerslam" => MoveData { name: "Powerslam", kind: MoveKind::Slam, damage: 9, difficulty: 5 },
    "germansuplex" => MoveData { name: "German Suplex", kind: MoveKind::Slam, damage: 9, difficulty: 5 },
    "figurefourleglock" => MoveData { name: "Figure-Four Leglock", kind: MoveKind::Submission, damage: 9, difficulty: 5 },
    "springboardclothesline" => MoveData { name: "Springboard Clothesline", kind: MoveKind::Aerial, damage: 9, difficulty: 5 },
    "spinebuster" => MoveData { name: "Spinebuster", kind: MoveKind::Slam, damage: 10, difficulty: 5 },
    "superkick" => MoveData { name: "Superkick", kind: MoveKind::Strike, damage: 10, difficulty: 6 },
    "divingelbowdrop" => MoveData { name: "Diving Elbow Drop", kind: MoveKind::Aerial, damage: 10, difficulty: 6 },
    "cloverleaf" => MoveData { name: "Cloverleaf", kind: MoveKind::Submission, damage: 10, difficulty: 6 },
    "doubleunderhooksuplex" => MoveData { name: "Double Underhook Suplex", kind: MoveKind::Grapple, damage: 10, difficulty: 6 },
    "brainbuster" => MoveData { name: "Brainbuster", kind: MoveKind::Slam, damage: 11, difficulty: 7 },
    "discuslariat" => MoveData { name: "Discus Lariat", kind: MoveKind::Strike, damage: 11, difficulty: 6 },
    "sharpshooter" => MoveData { name: "Sharpshooter", kind: MoveKind::Submission, damage: 11, difficulty: 7 },
    "frogsplash" => MoveData { name: "Frog Splash", kind: MoveKind::Aerial, damage: 11, difficulty: 7 },
    "tigersuplex" => MoveData { name: "Tiger Suplex", kind: MoveKind::Grapple, damage: 11, difficulty: 7 },
    "powerbomb" => MoveData { name: "Powerbomb", kind: MoveKind::Slam, damage: 12, difficulty: 7 },
    "moonsault" => MoveData { name: "Moonsault", kind: MoveKind::Aerial, damage: 12, difficulty: 8 },
    "crossface" => MoveData { name: "Crossface", kind: MoveKind::Submission, damage: 12, difficulty: 7 },
    "roaringelbow" => MoveData { name: "Roaring Elbow", kind: MoveKind::Strike, damage: 12, difficulty: 7 },
    "dragonsuplex" => MoveData { name: "Dragon Suplex", kind: MoveKind::Grapple, damage: 12, difficulty: 8 },
    "jackknifepowerbomb" => MoveData { name: "Jackknife Powerbomb", kind: MoveKind::Slam, damage: 13, difficulty: 8 },
    "guillotinechoke" => MoveData { name: "Guillotine Choke", kind: MoveKind::Submission, damage: 13, difficulty: 8 },
    "shootingstarpress" => MoveData { name: "Shooting Star Press", kind: MoveKind::Aerial, damage: 13, difficulty: 9 },
    "avalanchesuplex" => MoveData { name: "Avalanche Suplex", kind: MoveKind::Slam, damage: 14, difficulty: 8 },
    "kimuralock" => MoveData { name: "Kimura Lock", kind: MoveKind::Submission, damage: 14, difficulty: 9 },
    "topropepowerbomb" => MoveData { name: "Top-Rope Powerbomb", kind: MoveKind::Slam, damage: 15, difficulty: 9 },
    "fourfiftysplash" => MoveData { name: "450 Splash", kind: MoveKind::Aerial, damage: 15, difficulty: 9 },
    "burninghammer" => MoveData { name: "Burning Hammer", kind: MoveKind::Slam, damage: 16, difficulty: 10 },
    "avalanchehurricanrana" => MoveData { name: "Avalanche Hurricanrana", kind: MoveKind::Aerial, damage: 16, difficulty: 10 },
};

pub fn builtin_moves() -> Vec<Move> {
    MOVES.values().map(MoveData::to_move).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_by_normalized_id() {
        let powerbomb = MOVES.get("powerbomb").expect("Powerbomb must be present");
        assert_eq!(powerbomb.damage, 12);
        assert_eq!(powerbomb.kind, MoveKind::Slam);
    }

    #[test]
    fn every_damage_value_is_represented() {
        for damage in 3..=16 {
            assert!(
                MOVES.values().any(|mv| mv.damage == damage),
                "no move with damage {damage}"
            );
        }
    }

    #[test]
    fn catalog_values_are_within_model_bounds() {
        for mv in MOVES.values() {
            assert!((1..=16).contains(&mv.damage), "{}", mv.name);
            assert!((1..=10).contains(&mv.difficulty), "{}", mv.name);
        }
    }
}
