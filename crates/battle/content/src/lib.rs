//! Data-driven content for the battle tracker.
//!
//! This crate turns RON data files into `battle-core` values:
//! - the injury ruleset (data-driven, with an embedded default)
//! - character rosters, flattened into battle participants
//!
//! Flattening happens here so the engine never chases template references:
//! a participant enters `battle-core` with its abilities, passives, and
//! equipment already inlined. Content never appears in engine state.
//!
//! Document types in [`formats`] deserialize leniently — numeric bonus
//! fields accept numbers or strings and coerce garbage to zero, so one bad
//! sheet value cannot poison a battle.

#[cfg(feature = "serde")]
pub mod formats;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "serde")]
pub use formats::{
    AbilityDoc, BonusDoc, CharacterDoc, InjuryDoc, InjuryRuleDoc, PassiveDoc, RosterDoc,
    RulesetDoc, StatsDoc, WeaponDoc, WearableDoc,
};

#[cfg(feature = "loaders")]
pub use loaders::{RosterLoader, RulesLoader};
