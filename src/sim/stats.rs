use crate::sim::wrestler::AttributeSheet;
use serde::{Deserialize, Serialize};

/// The five derived combat stats, each roughly in [1, 20].
///
/// Derived once at construction from the 28 granular attributes and never
/// mutated during a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub strength: i32,
    pub dexterity: i32,
    pub endurance: i32,
    pub intelligence: i32,
    pub charisma: i32,
}

impl CombatStats {
    pub fn from_sheet(sheet: &AttributeSheet) -> Self {
        Self {
            strength: rounded_mean(&[
                sheet.powerlifting,
                sheet.grapple_control,
                sheet.grip_strength,
                sheet.brawling_technique,
            ]),
            dexterity: rounded_mean(&[
                sheet.agility,
                sheet.aerial_technique,
                sheet.balance,
                sheet.flexibility,
                sheet.quickness,
                sheet.footwork,
            ]),
            endurance: rounded_mean(&[
                sheet.cardio,
                sheet.toughness,
                sheet.pain_tolerance,
                sheet.recovery,
                sheet.durability,
                sheet.conditioning,
            ]),
            intelligence: rounded_mean(&[
                sheet.ring_psychology,
                sheet.focus,
                sheet.match_pacing,
                sheet.technical_knowledge,
                sheet.timing,
                sheet.adaptability,
            ]),
            charisma: rounded_mean(&[
                sheet.promo_delivery,
                sheet.crowd_work,
                sheet.presence,
                sheet.entrance_presence,
                sheet.confidence,
                sheet.fan_engagement,
            ]),
        }
    }
}

fn rounded_mean(values: &[i32]) -> i32 {
    let sum: i32 = values.iter().sum();
    let mean = sum as f32 / values.len() as f32;
    mean.round() as i32
}

/// Letter grade with a display colour for roster screens.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Grade {
    pub letter: &'static str,
    pub colour: &'static str,
}

/// Descending threshold table: >=18 S, >=16 A, >=13 B, >=10 C, >=7 D, else F.
pub fn grade_for(value: i32) -> Grade {
    match value {
        v if v >= 18 => Grade { letter: "S", colour: "gold" },
        v if v >= 16 => Grade { letter: "A", colour: "crimson" },
        v if v >= 13 => Grade { letter: "B", colour: "royalblue" },
        v if v >= 10 => Grade { letter: "C", colour: "seagreen" },
        v if v >= 7 => Grade { letter: "D", colour: "darkorange" },
        _ => Grade { letter: "F", colour: "gray" },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sheet_derives_all_tens() {
        let stats = CombatStats::from_sheet(&AttributeSheet::default());
        assert_eq!(stats.strength, 10);
        assert_eq!(stats.dexterity, 10);
        assert_eq!(stats.endurance, 10);
        assert_eq!(stats.intelligence, 10);
        assert_eq!(stats.charisma, 10);
    }

    #[test]
    fn strength_is_mean_of_power_attributes() {
        let sheet = AttributeSheet {
            powerlifting: 18,
            grapple_control: 16,
            grip_strength: 14,
            brawling_technique: 12,
            ..AttributeSheet::default()
        };
        let stats = CombatStats::from_sheet(&sheet);
        assert_eq!(stats.strength, 15);
        // Untouched groups stay at the baseline.
        assert_eq!(stats.charisma, 10);
    }

    #[test]
    fn rounding_is_half_up() {
        let sheet = AttributeSheet {
            powerlifting: 10,
            grapple_control: 10,
            grip_strength: 11,
            brawling_technique: 11,
            ..AttributeSheet::default()
        };
        // mean 10.5 rounds to 11
        assert_eq!(CombatStats::from_sheet(&sheet).strength, 11);
    }

    #[test]
    fn grade_thresholds_are_descending() {
        assert_eq!(grade_for(20).letter, "S");
        assert_eq!(grade_for(18).letter, "S");
        assert_eq!(grade_for(17).letter, "A");
        assert_eq!(grade_for(13).letter, "B");
        assert_eq!(grade_for(12).letter, "C");
        assert_eq!(grade_for(9).letter, "D");
        assert_eq!(grade_for(6).letter, "F");
        assert_eq!(grade_for(-3).letter, "F");
    }
}
