//! Battle state representation.
//!
//! This module owns the data structures that describe participants, their
//! timed effects and cooldowns, and the static injury ruleset. Callers clone
//! or query this state but replace it wholesale with the values returned by
//! [`crate::timeline`] — nothing in here mutates shared state.
pub mod types;

pub use types::{
    Ability, ActiveEffect, ActiveEffects, BaseStats, BonusEntry, Cooldown, Cooldowns, Injury,
    InjuryRule, InjuryTable, Participant, ParticipantId, Passive, PassiveTrigger, RulesError,
    TimeUnit, TimerId, Weapon, Wearable,
};
