//! Serde document types for ruleset and roster data files.
//!
//! These mirror the on-disk RON shapes and convert into `battle-core`
//! values. Numeric bonus fields deserialize leniently: numbers parse as
//! themselves, numeric strings parse as numbers, and anything else coerces
//! to zero instead of failing the whole file.

use std::fmt;

use serde::de::{Deserializer, Visitor};
use serde::Deserialize;

use battle_core::{
    Ability, BaseStats, BonusEntry, Injury, InjuryRule, Passive, PassiveTrigger, TimeUnit, Weapon,
    Wearable,
};

// ============================================================================
// Lenient numbers
// ============================================================================

struct LenientI32;

impl Visitor<'_> for LenientI32 {
    type Value = i32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a numeric string")
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i32, E> {
        Ok(v as i32)
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i32, E> {
        Ok(v as i32)
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<i32, E> {
        Ok(v as i32)
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<i32, E> {
        Ok(v.trim().parse().unwrap_or(0))
    }
}

/// Number-or-string, with unparsable values coerced to zero.
fn lenient_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    deserializer.deserialize_any(LenientI32)
}

// ============================================================================
// Ruleset documents
// ============================================================================

/// Top-level injury ruleset file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RulesetDoc {
    #[serde(default)]
    pub injuries: Vec<InjuryRuleDoc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InjuryRuleDoc {
    pub tag: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub value: i32,
    #[serde(default)]
    pub stack: Option<u32>,
}

impl From<InjuryRuleDoc> for InjuryRule {
    fn from(doc: InjuryRuleDoc) -> Self {
        InjuryRule {
            tag: doc.tag,
            label: doc.label,
            value: doc.value,
            stack: doc.stack,
        }
    }
}

// ============================================================================
// Roster documents
// ============================================================================

/// Top-level roster file: the characters joining a battle.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RosterDoc {
    #[serde(default)]
    pub characters: Vec<CharacterDoc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CharacterDoc {
    pub template_id: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub stats: StatsDoc,
    #[serde(default)]
    pub abilities: Vec<AbilityDoc>,
    #[serde(default)]
    pub passives: Vec<PassiveDoc>,
    #[serde(default)]
    pub weapons: Vec<WeaponDoc>,
    #[serde(default)]
    pub wearables: Vec<WearableDoc>,
    #[serde(default)]
    pub injuries: Vec<InjuryDoc>,
}

fn default_level() -> i32 {
    1
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct StatsDoc {
    pub physique: i32,
    pub mind: i32,
    pub soul: i32,
}

impl Default for StatsDoc {
    fn default() -> Self {
        Self {
            physique: 10,
            mind: 10,
            soul: 10,
        }
    }
}

impl From<StatsDoc> for BaseStats {
    fn from(doc: StatsDoc) -> Self {
        BaseStats::new(doc.physique, doc.mind, doc.soul)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BonusDoc {
    #[serde(default)]
    pub stat: String,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub value: i32,
}

impl From<BonusDoc> for BonusEntry {
    fn from(doc: BonusDoc) -> Self {
        BonusEntry::new(doc.stat, doc.value)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AbilityDoc {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub bonuses: Vec<BonusDoc>,
    #[serde(default = "default_cost")]
    pub cost: u32,
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub cooldown_unit: TimeUnit,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub duration_unit: TimeUnit,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub limit_unit: TimeUnit,
}

fn default_cost() -> u32 {
    1
}

impl From<AbilityDoc> for Ability {
    fn from(doc: AbilityDoc) -> Self {
        Ability {
            id: doc.id,
            name: doc.name,
            tags: doc.tags,
            bonuses: doc.bonuses.into_iter().map(Into::into).collect(),
            cost: doc.cost,
            cooldown: doc.cooldown,
            cooldown_unit: doc.cooldown_unit,
            duration: doc.duration,
            duration_unit: doc.duration_unit,
            limit: doc.limit,
            limit_unit: doc.limit_unit,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PassiveDoc {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub bonus: i32,
    #[serde(default)]
    pub trigger: PassiveTrigger,
    #[serde(default)]
    pub target_ability: Option<String>,
}

impl From<PassiveDoc> for Passive {
    fn from(doc: PassiveDoc) -> Self {
        Passive {
            name: doc.name,
            tags: doc.tags,
            bonus: doc.bonus,
            trigger: doc.trigger,
            target_ability: doc.target_ability,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeaponDoc {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub bonuses: Vec<BonusDoc>,
    #[serde(default)]
    pub equipped: bool,
}

impl From<WeaponDoc> for Weapon {
    fn from(doc: WeaponDoc) -> Self {
        Weapon {
            name: doc.name,
            tags: doc.tags,
            bonuses: doc.bonuses.into_iter().map(Into::into).collect(),
            equipped: doc.equipped,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WearableDoc {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub bonus: i32,
    #[serde(default)]
    pub equipped: bool,
}

impl From<WearableDoc> for Wearable {
    fn from(doc: WearableDoc) -> Self {
        Wearable {
            name: doc.name,
            tags: doc.tags,
            bonus: doc.bonus,
            equipped: doc.equipped,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct InjuryDoc {
    pub tag: String,
    #[serde(default)]
    pub label: String,
}

impl From<InjuryDoc> for Injury {
    fn from(doc: InjuryDoc) -> Self {
        Injury {
            tag: doc.tag,
            label: doc.label,
        }
    }
}
