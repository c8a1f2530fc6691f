//! Deterministic combat resolution for the battle tracker.
//!
//! `battle-core` owns the rules that turn a queued sequence of combat actions
//! into roll bonuses and a readable narration, plus the round/action-point
//! lifecycle of effects and cooldowns. Every operation is a pure function
//! over in-memory values: callers hand in participants and get new
//! participants back, so two evaluations over distinct copies can never
//! interfere. Persistence and UI live in other crates.
pub mod config;
pub mod resolve;
pub mod sequence;
pub mod state;
pub mod tags;
pub mod timeline;

pub use config::BattleConfig;
pub use resolve::{
    Factor, FactorSource, RollBreakdown, dice_pool, live_stat, matching_factors, roll_breakdown,
    total_bonus,
};
pub use sequence::{
    ActionNode, ComboNode, ConditionNode, SequenceError, SequenceNode, resolve_sequence,
};
pub use state::{
    Ability, ActiveEffect, ActiveEffects, BaseStats, BonusEntry, Cooldown, Cooldowns, Injury,
    InjuryRule, InjuryTable, Participant, ParticipantId, Passive, PassiveTrigger, RulesError,
    TimeUnit, TimerId, Weapon, Wearable,
};
pub use tags::{RenderKind, StatKind, TagClasses};
pub use timeline::{advance_round, commit_sequence, commit_use, tick_action_timers};
