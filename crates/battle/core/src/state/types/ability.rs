//! Abilities and passive traits.
//!
//! Abilities are the active capabilities a participant can queue in a
//! sequence; passives contribute bonuses automatically when their trigger
//! condition matches the current action context.
//!
//! # Design
//!
//! - **Ability**: tagged, with stat-scaling bonus entries and a timed
//!   lifecycle (cooldown, duration, optional usage limit — each value+unit)
//! - **Passive**: untriggered trait; its [`PassiveTrigger`] decides when the
//!   modifier aggregator includes it
//! - Both are flattened onto the participant by the content loader; the
//!   engine never chases template references

use super::common::TimeUnit;
use super::equipment::Weapon;
use crate::tags;

/// One stat-scaling bonus entry on an ability or weapon.
///
/// The `stat` token is matched against the stat markers of the lexicon:
/// a recognized stat injects the live stat value, `cleanb` contributes the
/// raw value alone, and the empty/`any` wildcard (weapons only) rides along
/// with whatever stats the action already uses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusEntry {
    pub stat: String,
    pub value: i32,
}

impl BonusEntry {
    pub fn new(stat: impl Into<String>, value: i32) -> Self {
        Self {
            stat: stat.into(),
            value,
        }
    }
}

/// An active capability a participant can use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub bonuses: Vec<BonusEntry>,

    /// Action points one use spends; drives action-unit timer ticks.
    pub cost: u32,

    /// Re-use lockout applied on use (or on effect expiry when `duration > 0`).
    /// Zero means no cooldown.
    pub cooldown: u32,
    pub cooldown_unit: TimeUnit,

    /// Nonzero turns a use into an [`super::timers::ActiveEffect`] instead of
    /// an immediate cooldown.
    pub duration: u32,
    pub duration_unit: TimeUnit,

    /// Uses allowed per limit-unit window. Zero means unlimited.
    pub limit: u32,
    pub limit_unit: TimeUnit,
}

impl Ability {
    /// Union of the ability's tags and the equipped weapon's tags, deduped
    /// under canonical comparison — the action's matching fingerprint.
    pub fn merged_tags(&self, weapon: Option<&Weapon>) -> Vec<String> {
        let mut merged: Vec<String> = Vec::new();
        let weapon_tags = weapon.map(|w| w.tags.as_slice()).unwrap_or(&[]);
        for tag in self.tags.iter().chain(weapon_tags) {
            if !merged.iter().any(|t| tags::canon_eq(t, tag)) {
                merged.push(tag.clone());
            }
        }
        merged
    }
}

/// When a passive's bonus is included by the modifier aggregator.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PassiveTrigger {
    /// Fires when the acting ability's name equals `target_ability` exactly;
    /// tags are ignored.
    Ability,
    /// Fires when the passive's tags overlap the *opponent's* tags.
    /// Applied to the math but hidden from the printed modifier list.
    Weakness,
    /// Opposite sign of [`PassiveTrigger::Weakness`], same matching rule.
    Resistance,
    /// Fires when the action tags mark it offensive.
    OnHit,
    /// Fires when the action tags mark it defensive.
    OnDefense,
    /// Fires when the passive's tags overlap the action's merged tags.
    #[default]
    Tags,
}

/// A passive trait contributing a bonus when its trigger matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passive {
    pub name: String,
    pub tags: Vec<String>,
    pub bonus: i32,
    pub trigger: PassiveTrigger,
    /// Ability name this passive reacts to; only read for
    /// [`PassiveTrigger::Ability`].
    pub target_ability: Option<String>,
}
