//! The participant aggregate.
//!
//! A participant is the battle instance of a character: base stats plus
//! everything the external loader flattened onto it — abilities, passives,
//! equipment — and the mutable battle-local lists the timeline advances.

use std::collections::BTreeMap;

use super::ability::{Ability, Passive};
use super::common::{ParticipantId, TimerId};
use super::equipment::{Weapon, Wearable};
use super::injury::Injury;
use super::timers::{ActiveEffects, Cooldowns};
use crate::tags::{self, StatKind};

/// The three base stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub physique: i32,
    pub mind: i32,
    pub soul: i32,
}

impl BaseStats {
    pub fn new(physique: i32, mind: i32, soul: i32) -> Self {
        Self {
            physique,
            mind,
            soul,
        }
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Physique => self.physique,
            StatKind::Mind => self.mind,
            StatKind::Soul => self.soul,
        }
    }
}

impl Default for BaseStats {
    /// Average line: all 10.
    fn default() -> Self {
        Self::new(10, 10, 10)
    }
}

/// Battle instance of a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    /// Unique within the battle.
    pub id: ParticipantId,
    /// Character template this instance was flattened from; may repeat.
    pub template_id: String,
    pub name: String,
    pub level: i32,
    pub stats: BaseStats,

    pub injuries: Vec<Injury>,
    pub effects: ActiveEffects,
    pub cooldowns: Cooldowns,

    pub abilities: Vec<Ability>,
    pub passives: Vec<Passive>,
    pub weapons: Vec<Weapon>,
    pub wearables: Vec<Wearable>,

    /// Per-ability uses this round, keyed by canonical ability name.
    pub uses: BTreeMap<String, u32>,

    /// Sequential timer-id allocator; never reused.
    next_timer_id: u32,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            stats: BaseStats::default(),
            ..Self::default()
        }
    }

    /// Looks up an ability by id (exact match).
    pub fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }

    /// Looks up an *equipped* weapon by name; stowed weapons never resolve.
    pub fn equipped_weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.equipped && tags::canon_eq(&w.name, name))
    }

    /// True if a cooldown with this canonical name is running.
    pub fn has_cooldown(&self, name: &str) -> bool {
        self.cooldowns
            .iter()
            .any(|cd| tags::canon_eq(&cd.name, name))
    }

    /// Uses of the named ability recorded this round.
    pub fn uses_of(&self, name: &str) -> u32 {
        self.uses.get(&tags::canon(name)).copied().unwrap_or(0)
    }

    /// Records one use of the named ability and returns the new count.
    pub fn record_use(&mut self, name: &str) -> u32 {
        let count = self.uses.entry(tags::canon(name)).or_insert(0);
        *count += 1;
        *count
    }

    /// Allocates the next timer id.
    pub fn allocate_timer_id(&mut self) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        id
    }
}
