use crate::sim::moves::{Move, MoveKind};
use crate::sim::stats::CombatStats;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The 28 granular attributes of a wrestler profile, each typically in [5, 20].
///
/// Absent values default to 10 at every entry point (`Default`, serde, and
/// `from_map`), so a partial profile never fails to load.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSheet {
    // strength
    pub powerlifting: i32,
    pub grapple_control: i32,
    pub grip_strength: i32,
    pub brawling_technique: i32,
    // dexterity
    pub agility: i32,
    pub aerial_technique: i32,
    pub balance: i32,
    pub flexibility: i32,
    pub quickness: i32,
    pub footwork: i32,
    // endurance
    pub cardio: i32,
    pub toughness: i32,
    pub pain_tolerance: i32,
    pub recovery: i32,
    pub durability: i32,
    pub conditioning: i32,
    // intelligence
    pub ring_psychology: i32,
    pub focus: i32,
    pub match_pacing: i32,
    pub technical_knowledge: i32,
    pub timing: i32,
    pub adaptability: i32,
    // charisma
    pub promo_delivery: i32,
    pub crowd_work: i32,
    pub presence: i32,
    pub entrance_presence: i32,
    pub confidence: i32,
    pub fan_engagement: i32,
}

impl Default for AttributeSheet {
    fn default() -> Self {
        Self {
            powerlifting: 10,
            grapple_control: 10,
            grip_strength: 10,
            brawling_technique: 10,
            agility: 10,
            aerial_technique: 10,
            balance: 10,
            flexibility: 10,
            quickness: 10,
            footwork: 10,
            cardio: 10,
            toughness: 10,
            pain_tolerance: 10,
            recovery: 10,
            durability: 10,
            conditioning: 10,
            ring_psychology: 10,
            focus: 10,
            match_pacing: 10,
            technical_knowledge: 10,
            timing: 10,
            adaptability: 10,
            promo_delivery: 10,
            crowd_work: 10,
            presence: 10,
            entrance_presence: 10,
            confidence: 10,
            fan_engagement: 10,
        }
    }
}

impl AttributeSheet {
    /// Build a sheet from loosely-keyed storage rows. Unknown keys are
    /// ignored, missing keys keep the 10 default.
    pub fn from_map(map: &HashMap<String, i32>) -> Self {
        let mut sheet = Self::default();
        for (key, &value) in map {
            if let Some(slot) = sheet.slot_mut(key) {
                *slot = value;
            }
        }
        sheet
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut i32> {
        let slot = match key {
            "powerlifting" => &mut self.powerlifting,
            "grapple_control" => &mut self.grapple_control,
            "grip_strength" => &mut self.grip_strength,
            "brawling_technique" => &mut self.brawling_technique,
            "agility" => &mut self.agility,
            "aerial_technique" => &mut self.aerial_technique,
            "balance" => &mut self.balance,
            "flexibility" => &mut self.flexibility,
            "quickness" => &mut self.quickness,
            "footwork" => &mut self.footwork,
            "cardio" => &mut self.cardio,
            "toughness" => &mut self.toughness,
            "pain_tolerance" => &mut self.pain_tolerance,
            "recovery" => &mut self.recovery,
            "durability" => &mut self.durability,
            "conditioning" => &mut self.conditioning,
            "ring_psychology" => &mut self.ring_psychology,
            "focus" => &mut self.focus,
            "match_pacing" => &mut self.match_pacing,
            "technical_knowledge" => &mut self.technical_knowledge,
            "timing" => &mut self.timing,
            "adaptability" => &mut self.adaptability,
            "promo_delivery" => &mut self.promo_delivery,
            "crowd_work" => &mut self.crowd_work,
            "presence" => &mut self.presence,
            "entrance_presence" => &mut self.entrance_presence,
            "confidence" => &mut self.confidence,
            "fan_engagement" => &mut self.fan_engagement,
            _ => return None,
        };
        Some(slot)
    }

    fn clamp_all(&mut self) {
        for slot in [
            &mut self.powerlifting,
            &mut self.grapple_control,
            &mut self.grip_strength,
            &mut self.brawling_technique,
            &mut self.agility,
            &mut self.aerial_technique,
            &mut self.balance,
            &mut self.flexibility,
            &mut self.quickness,
            &mut self.footwork,
            &mut self.cardio,
            &mut self.toughness,
            &mut self.pain_tolerance,
            &mut self.recovery,
            &mut self.durability,
            &mut self.conditioning,
            &mut self.ring_psychology,
            &mut self.focus,
            &mut self.match_pacing,
            &mut self.technical_knowledge,
            &mut self.timing,
            &mut self.adaptability,
            &mut self.promo_delivery,
            &mut self.crowd_work,
            &mut self.presence,
            &mut self.entrance_presence,
            &mut self.confidence,
            &mut self.fan_engagement,
        ] {
            *slot = (*slot).clamp(1, 20);
        }
    }
}

/// A wrestler's finishing move. Styled like a regular move; submission-style
/// finishers resolve through the submission contest instead of a pin attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finisher {
    pub name: String,
    pub style: MoveKind,
    pub damage: i32,
}

/// Immutable wrestler profile. All match-scoped mutable state lives in
/// [`Competitor`]; nothing here changes during a bout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wrestler {
    pub id: u32,
    pub name: String,
    pub attributes: AttributeSheet,
    pub stats: CombatStats,
    pub finisher: Finisher,
    pub signatures: Vec<Move>,
}

impl Wrestler {
    /// Validated construction: attributes are clamped into [1, 20] and the
    /// five combat stats derived once, here. There is no fallback accessor
    /// chain anywhere else.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        mut attributes: AttributeSheet,
        finisher: Finisher,
        signatures: Vec<Move>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            bail!("wrestler {id} has an empty name");
        }
        if finisher.damage <= 0 {
            bail!("finisher '{}' must deal positive damage", finisher.name);
        }
        attributes.clamp_all();
        let stats = CombatStats::from_sheet(&attributes);
        Ok(Self {
            id,
            name,
            attributes,
            stats,
            finisher,
            signatures,
        })
    }
}

/// Match-scoped state for one side of the ring. Created at match start,
/// consumed into the result at match end.
#[derive(Clone, Debug)]
pub struct Competitor {
    pub wrestler: Wrestler,
    pub stamina: i32,
    pub damage_taken: i32,
    pub momentum: bool,
    pub submission_escapes: u32,
    pub reversals: u32,
}

impl Competitor {
    pub fn new(wrestler: Wrestler) -> Self {
        Self {
            wrestler,
            stamina: 100,
            damage_taken: 0,
            momentum: false,
            submission_escapes: 0,
            reversals: 0,
        }
    }

    /// Stamina is clamped to [0, 100] at the mutation site.
    pub fn drain_stamina(&mut self, amount: i32) {
        self.stamina = (self.stamina - amount).clamp(0, 100);
    }

    /// Damage may transiently exceed 100; the lower bound is enforced here.
    pub fn take_damage(&mut self, amount: i32) {
        self.damage_taken = (self.damage_taken + amount).max(0);
    }

    pub fn stamina_drain(&self) -> i32 {
        100 - self.stamina
    }
}
