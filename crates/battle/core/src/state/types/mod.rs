pub mod ability;
pub mod common;
pub mod equipment;
pub mod injury;
pub mod participant;
pub mod timers;

// Re-export ability types
pub use ability::{Ability, BonusEntry, Passive, PassiveTrigger};

// Re-export common types
pub use common::{ParticipantId, TimeUnit, TimerId};

// Re-export equipment
pub use equipment::{Weapon, Wearable};

// Re-export injury ruleset types
pub use injury::{Injury, InjuryRule, InjuryTable, RulesError};

// Re-export the participant aggregate
pub use participant::{BaseStats, Participant};

// Re-export timed entries
pub use timers::{ActiveEffect, ActiveEffects, Cooldown, Cooldowns};
