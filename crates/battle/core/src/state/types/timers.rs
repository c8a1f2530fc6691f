//! Timed entries: active effects and cooldowns.
//!
//! Both run on one of the two clocks in [`super::common::TimeUnit`] and are
//! advanced exclusively by [`crate::timeline`]. Collections are bounded; the
//! timeline guards pushes with `is_full()` and drops overflow silently
//! rather than aborting a commit.

use arrayvec::ArrayVec;

use super::ability::BonusEntry;
use super::common::{TimeUnit, TimerId};
use crate::config::BattleConfig;

/// A temporary timed modifier, usually created by using a duration-bearing
/// ability.
///
/// Decremented on matching-unit ticks; at zero it is destroyed and, when
/// `source` names an ability with a nonzero cooldown, replaced by a
/// [`Cooldown`] for that ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub id: TimerId,
    pub name: String,
    pub tags: Vec<String>,
    pub bonuses: Vec<BonusEntry>,
    /// Remaining duration in `unit` steps; always > 0 while stored.
    pub remaining: u32,
    pub unit: TimeUnit,
    /// Ability id this effect expires into a cooldown for, if any.
    pub source: Option<String>,
}

impl ActiveEffect {
    /// Summed raw bonus the effect contributes through the aggregator.
    pub fn flat_bonus(&self) -> i32 {
        self.bonuses.iter().map(|entry| entry.value).sum()
    }
}

/// A timed restriction preventing re-use of a named ability.
///
/// Spawn sites guard by name, so repeated ticking and re-entrant expiry can
/// never stack duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    pub id: TimerId,
    pub name: String,
    /// Remaining lockout in `unit` steps; entries at zero are removed.
    pub remaining: u32,
    pub max: u32,
    pub unit: TimeUnit,
}

/// Active effects on one participant.
pub type ActiveEffects = ArrayVec<ActiveEffect, { BattleConfig::MAX_EFFECTS }>;

/// Running cooldowns on one participant.
pub type Cooldowns = ArrayVec<Cooldown, { BattleConfig::MAX_COOLDOWNS }>;
