//! Modifier aggregation.
//!
//! Collects the named bonus contributions a single action attracts from the
//! acting participant's passives, active effects, and worn equipment. Each
//! source has its own inclusion rule; all of them compare tags through the
//! canonical lexicon. Weakness/resistance passives count toward the math but
//! stay out of the printed modifier list.

use crate::state::{Participant, PassiveTrigger};
use crate::tags::{self, TagClasses};

/// Where a modifier came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FactorSource {
    Passive,
    Effect,
    Wearable,
}

/// One named modifier contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Factor {
    pub name: String,
    pub bonus: i32,
    pub source: FactorSource,
    pub tags: Vec<String>,
    /// False for weakness/resistance entries: applied, never printed.
    pub visible: bool,
}

/// Modifiers matching one action.
///
/// Inclusion rules by source:
/// - passive `ability` trigger: configured target ability name equals the
///   acting ability's name (canonical comparison); tags ignored
/// - passive `weakness`/`resistance`: passive tags overlap the *opponent's*
///   tags, and only when opponent tags were supplied
/// - passive `on_hit`: action tags mark the action offensive
/// - passive `on_defense`: action tags mark the action defensive
/// - passive `tags`: passive tags overlap the action's merged tags
/// - active effects: effect tags overlap the action tags
/// - wearables: equipped and tags overlap the action tags
pub fn matching_factors(
    participant: &Participant,
    action_tags: &[String],
    ability_name: &str,
    opponent_tags: Option<&[String]>,
) -> Vec<Factor> {
    let action_classes = tags::classes(action_tags);
    let mut factors = Vec::new();

    for passive in &participant.passives {
        let hidden = matches!(
            passive.trigger,
            PassiveTrigger::Weakness | PassiveTrigger::Resistance
        );
        let included = match passive.trigger {
            PassiveTrigger::Ability => passive
                .target_ability
                .as_deref()
                .is_some_and(|target| tags::canon_eq(target, ability_name)),
            PassiveTrigger::Weakness | PassiveTrigger::Resistance => {
                opponent_tags.is_some_and(|opponent| tags::overlaps(&passive.tags, opponent))
            }
            PassiveTrigger::OnHit => action_classes.contains(TagClasses::OFFENSIVE),
            PassiveTrigger::OnDefense => action_classes.contains(TagClasses::DEFENSIVE),
            PassiveTrigger::Tags => tags::overlaps(&passive.tags, action_tags),
        };
        if included {
            factors.push(Factor {
                name: passive.name.clone(),
                bonus: passive.bonus,
                source: FactorSource::Passive,
                tags: passive.tags.clone(),
                visible: !hidden,
            });
        }
    }

    for effect in &participant.effects {
        if tags::overlaps(&effect.tags, action_tags) {
            factors.push(Factor {
                name: effect.name.clone(),
                bonus: effect.flat_bonus(),
                source: FactorSource::Effect,
                tags: effect.tags.clone(),
                visible: true,
            });
        }
    }

    for wearable in &participant.wearables {
        if wearable.equipped && tags::overlaps(&wearable.tags, action_tags) {
            factors.push(Factor {
                name: wearable.name.clone(),
                bonus: wearable.bonus,
                source: FactorSource::Wearable,
                tags: wearable.tags.clone(),
                visible: true,
            });
        }
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        ActiveEffect, BonusEntry, Participant, ParticipantId, Passive, TimeUnit, TimerId, Wearable,
    };

    fn tagv(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn subject() -> Participant {
        Participant::new(ParticipantId(0), "Subject")
    }

    fn passive(name: &str, trigger: PassiveTrigger, tags: &[&str], bonus: i32) -> Passive {
        Passive {
            name: name.into(),
            tags: tagv(tags),
            bonus,
            trigger,
            target_ability: None,
        }
    }

    #[test]
    fn unequipped_wearables_never_contribute() {
        let mut p = subject();
        p.wearables.push(Wearable {
            name: "Charm".into(),
            tags: tagv(&["fire"]),
            bonus: 3,
            equipped: false,
        });
        assert!(matching_factors(&p, &tagv(&["fire"]), "Strike", None).is_empty());

        p.wearables[0].equipped = true;
        assert_eq!(matching_factors(&p, &tagv(&["fire"]), "Strike", None).len(), 1);
    }

    #[test]
    fn weakness_needs_opponent_tags_and_stays_hidden() {
        let mut p = subject();
        p.passives
            .push(passive("Fear of Fire", PassiveTrigger::Weakness, &["fire"], -4));

        assert!(matching_factors(&p, &tagv(&["dodge"]), "Dodge", None).is_empty());

        let opponent = tagv(&["fire", "melee"]);
        let found = matching_factors(&p, &tagv(&["dodge"]), "Dodge", Some(&opponent));
        assert_eq!(found.len(), 1);
        assert!(!found[0].visible);
        assert_eq!(found[0].bonus, -4);
    }

    #[test]
    fn on_hit_requires_offensive_action_tags() {
        let mut p = subject();
        p.passives
            .push(passive("Brutal", PassiveTrigger::OnHit, &[], 2));

        assert!(matching_factors(&p, &tagv(&["dodge"]), "Dodge", None).is_empty());
        let found = matching_factors(&p, &tagv(&["melee_attack"]), "Strike", None);
        assert_eq!(found.len(), 1);
        assert!(found[0].visible);
    }

    #[test]
    fn ability_trigger_matches_name_exactly_ignoring_tags() {
        let mut p = subject();
        p.passives.push(Passive {
            name: "Signature Move".into(),
            tags: tagv(&["unrelated"]),
            bonus: 5,
            trigger: PassiveTrigger::Ability,
            target_ability: Some("Whirlwind".into()),
        });

        assert!(matching_factors(&p, &tagv(&["melee"]), "Strike", None).is_empty());
        assert_eq!(
            matching_factors(&p, &tagv(&["melee"]), " whirlwind ", None).len(),
            1
        );
    }

    #[test]
    fn effects_match_on_tag_overlap() {
        let mut p = subject();
        p.effects.push(ActiveEffect {
            id: TimerId(0),
            name: "Battle Focus".into(),
            tags: tagv(&["melee"]),
            bonuses: vec![BonusEntry::new("cleanb", 2), BonusEntry::new("cleanb", 1)],
            remaining: 2,
            unit: TimeUnit::Round,
            source: None,
        });

        let found = matching_factors(&p, &tagv(&["melee", "fire"]), "Strike", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].bonus, 3);
        assert!(matching_factors(&p, &tagv(&["soul_ritual"]), "Rite", None).is_empty());
    }
}
