//! Round and action-point lifecycle of effects and cooldowns.
//!
//! Two overlapping clocks advance the timed lists: [`advance_round`] ticks
//! every round-unit entry once per round, [`tick_action_timers`] ticks
//! action-unit entries by the action points an action spent. Both are pure —
//! callers replace their stored participants with the returned values.
//!
//! # Invariants
//!
//! - Remaining values never go negative; entries at zero are removed.
//! - Every cooldown spawn site guards by canonical name, so repeated ticking
//!   and re-entrant expiry stay idempotent.
//! - An ability that reached its usage limit already received its cooldown
//!   from [`commit_use`]; the per-round check in [`advance_round`] relies on
//!   that and only covers partial use (1..limit−1).

use tracing::debug;

use crate::sequence::{ActionNode, SequenceNode};
use crate::state::{
    ActiveEffect, Ability, BonusEntry, Cooldown, Participant, PassiveTrigger, TimeUnit,
};
use crate::tags;

// ============================================================================
// Spawn helpers (all name-guarded)
// ============================================================================

fn spawn_cooldown(participant: &mut Participant, ability: &Ability) {
    if ability.cooldown == 0 || participant.has_cooldown(&ability.name) {
        return;
    }
    if participant.cooldowns.is_full() {
        debug!(name = %ability.name, "cooldown list full, dropping spawn");
        return;
    }
    let id = participant.allocate_timer_id();
    participant.cooldowns.push(Cooldown {
        id,
        name: ability.name.clone(),
        remaining: ability.cooldown,
        max: ability.cooldown,
        unit: ability.cooldown_unit,
    });
}

fn push_effect(participant: &mut Participant, mut effect: ActiveEffect) {
    if participant.effects.is_full() {
        debug!(name = %effect.name, "effect list full, dropping spawn");
        return;
    }
    effect.id = participant.allocate_timer_id();
    participant.effects.push(effect);
}

/// Expires one effect: spawns the replacement cooldown from its source
/// ability, when that ability still exists and carries a cooldown.
fn expire_effect(next: &mut Participant, effect: &ActiveEffect, source_of: &Participant) {
    debug!(effect = %effect.name, "effect expired");
    let Some(source_id) = effect.source.as_deref() else {
        return;
    };
    let Some(ability) = source_of.ability(source_id) else {
        debug!(effect = %effect.name, source = source_id, "dangling source ability, no cooldown");
        return;
    };
    spawn_cooldown(next, ability);
}

// ============================================================================
// Round clock
// ============================================================================

/// Advances the round clock for every participant.
pub fn advance_round(participants: &[Participant]) -> Vec<Participant> {
    participants.iter().map(advance_participant).collect()
}

fn advance_participant(participant: &Participant) -> Participant {
    let mut next = participant.clone();

    // Usage-limited abilities on the round clock: partial use this round
    // still earns the cooldown (a reached limit already got one at commit
    // time), and the counter resets for the new round.
    for ability in &participant.abilities {
        if ability.limit == 0 || ability.limit_unit != TimeUnit::Round {
            continue;
        }
        let used = participant.uses_of(&ability.name);
        if used >= 1 && used < ability.limit {
            spawn_cooldown(&mut next, ability);
        }
        if used > 0 {
            next.uses.remove(&tags::canon(&ability.name));
        }
    }

    next.cooldowns.retain(|cooldown| {
        if cooldown.unit != TimeUnit::Round {
            return true;
        }
        cooldown.remaining = cooldown.remaining.saturating_sub(1);
        cooldown.remaining > 0
    });

    let effects = std::mem::take(&mut next.effects);
    for mut effect in effects {
        if effect.unit != TimeUnit::Round {
            next.effects.push(effect);
            continue;
        }
        if effect.remaining <= 1 {
            expire_effect(&mut next, &effect, participant);
        } else {
            effect.remaining -= 1;
            next.effects.push(effect);
        }
    }

    next
}

// ============================================================================
// Action-point clock
// ============================================================================

/// Ticks action-unit entries by the spent action-point cost.
///
/// Same expiry and replacement-cooldown logic as the round clock, restricted
/// to [`TimeUnit::Action`] entries and decremented by `cost`, clamped at 0.
pub fn tick_action_timers(participant: &Participant, cost: u32) -> Participant {
    let mut next = participant.clone();
    if cost == 0 {
        return next;
    }

    next.cooldowns.retain(|cooldown| {
        if cooldown.unit != TimeUnit::Action {
            return true;
        }
        cooldown.remaining = cooldown.remaining.saturating_sub(cost);
        cooldown.remaining > 0
    });

    let effects = std::mem::take(&mut next.effects);
    for mut effect in effects {
        if effect.unit != TimeUnit::Action {
            next.effects.push(effect);
            continue;
        }
        if effect.remaining <= cost {
            expire_effect(&mut next, &effect, participant);
        } else {
            effect.remaining -= cost;
            next.effects.push(effect);
        }
    }

    next
}

// ============================================================================
// Commit-time coupling
// ============================================================================

/// Applies one use of an ability at commit time.
///
/// - duration > 0: pushes an [`ActiveEffect`] carrying the ability's tags and
///   bonuses, plus synced linked effects from `ability`-triggered passives
///   targeting this ability's name
/// - cooldown > 0, no duration, not usage-limited: pushes the cooldown
///   immediately
/// - usage-limited: records the use; reaching the limit pushes the cooldown
///   immediately (the precondition [`advance_round`] relies on)
///
/// An unknown ability id leaves the participant unchanged.
pub fn commit_use(participant: &Participant, ability_id: &str) -> Participant {
    let Some(ability) = participant.ability(ability_id).cloned() else {
        debug!(ability = ability_id, "commit for a missing ability, skipping");
        return participant.clone();
    };
    let mut next = participant.clone();

    if ability.duration > 0 {
        push_effect(
            &mut next,
            ActiveEffect {
                id: Default::default(),
                name: ability.name.clone(),
                tags: ability.tags.clone(),
                bonuses: ability.bonuses.clone(),
                remaining: ability.duration,
                unit: ability.duration_unit,
                source: Some(ability.id.clone()),
            },
        );
        for passive in &participant.passives {
            let linked = passive.trigger == PassiveTrigger::Ability
                && passive
                    .target_ability
                    .as_deref()
                    .is_some_and(|target| tags::canon_eq(target, &ability.name));
            if linked {
                push_effect(
                    &mut next,
                    ActiveEffect {
                        id: Default::default(),
                        name: passive.name.clone(),
                        tags: passive.tags.clone(),
                        bonuses: vec![BonusEntry::new(tags::CLEAN_BONUS_TOKEN, passive.bonus)],
                        remaining: ability.duration,
                        unit: ability.duration_unit,
                        source: None,
                    },
                );
            }
        }
    } else if ability.cooldown > 0 && ability.limit == 0 {
        spawn_cooldown(&mut next, &ability);
    }

    if ability.limit > 0 {
        let used = next.record_use(&ability.name);
        if used >= ability.limit {
            spawn_cooldown(&mut next, &ability);
        }
    }

    next
}

/// Commits a whole queued sequence.
///
/// Walks the tree in evaluation order; for every resolvable action the
/// actor's action-unit timers tick by the ability's cost, then the use is
/// applied. Unresolvable actions are skipped.
pub fn commit_sequence(nodes: &[SequenceNode], participants: &[Participant]) -> Vec<Participant> {
    let mut out = participants.to_vec();
    for node in nodes {
        commit_node(node, &mut out);
    }
    out
}

fn commit_node(node: &SequenceNode, participants: &mut Vec<Participant>) {
    match node {
        SequenceNode::Action(action) => commit_action(action, participants),
        SequenceNode::Combo(combo) => {
            for action in combo.actions() {
                commit_action(action, participants);
            }
        }
        SequenceNode::Condition(condition) => {
            for child in &condition.children {
                commit_node(child, participants);
            }
        }
        SequenceNode::LogicChain(conditions) => {
            for condition in conditions {
                for child in &condition.children {
                    commit_node(child, participants);
                }
            }
        }
        SequenceNode::Divider => {}
    }
}

fn commit_action(action: &ActionNode, participants: &mut Vec<Participant>) {
    let Some(index) = participants.iter().position(|p| p.id == action.actor) else {
        debug!(actor = %action.actor, "commit references a missing participant");
        return;
    };
    let Some(cost) = participants[index].ability(&action.ability).map(|a| a.cost) else {
        debug!(actor = %action.actor, ability = %action.ability, "commit references a missing ability");
        return;
    };
    let ticked = tick_action_timers(&participants[index], cost);
    participants[index] = commit_use(&ticked, &action.ability);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ParticipantId, Passive, TimerId};

    fn tagv(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn subject(abilities: Vec<Ability>) -> Participant {
        let mut p = Participant::new(ParticipantId(0), "Subject");
        p.abilities = abilities;
        p
    }

    fn ability(id: &str, name: &str) -> Ability {
        Ability {
            id: id.into(),
            name: name.into(),
            cost: 1,
            ..Ability::default()
        }
    }

    fn effect(name: &str, remaining: u32, unit: TimeUnit, source: Option<&str>) -> ActiveEffect {
        ActiveEffect {
            id: TimerId(0),
            name: name.into(),
            tags: vec![],
            bonuses: vec![],
            remaining,
            unit,
            source: source.map(str::to_string),
        }
    }

    fn cooldown(name: &str, remaining: u32, unit: TimeUnit) -> Cooldown {
        Cooldown {
            id: TimerId(0),
            name: name.into(),
            remaining,
            max: remaining,
            unit,
        }
    }

    #[test]
    fn round_cooldowns_tick_down_by_one_and_drop_at_zero() {
        let mut p = subject(vec![]);
        p.cooldowns.push(cooldown("Slam", 2, TimeUnit::Round));
        p.cooldowns.push(cooldown("Dash", 3, TimeUnit::Action));

        let after = advance_round(&[p]);
        assert_eq!(after[0].cooldowns.len(), 2);
        assert_eq!(after[0].cooldowns[0].remaining, 1);
        // Action-unit entries pass through the round clock unchanged.
        assert_eq!(after[0].cooldowns[1].remaining, 3);

        let after = advance_round(&after);
        assert_eq!(after[0].cooldowns.len(), 1);
        assert_eq!(after[0].cooldowns[0].name, "Dash");
    }

    #[test]
    fn expiring_effect_spawns_source_cooldown_once() {
        let mut ab = ability("ab-1", "War Shout");
        ab.cooldown = 2;
        let mut p = subject(vec![ab]);
        p.effects.push(effect("War Shout", 1, TimeUnit::Round, Some("ab-1")));

        let after = advance_round(&[p]);
        assert!(after[0].effects.is_empty());
        assert_eq!(after[0].cooldowns.len(), 1);
        assert_eq!(after[0].cooldowns[0].name, "War Shout");
        assert_eq!(after[0].cooldowns[0].remaining, 2);

        // Re-entrant expiry never duplicates: a second effect with the same
        // source expiring next round finds the guard.
        let mut again = after[0].clone();
        again.effects.push(effect("War Shout", 1, TimeUnit::Round, Some("ab-1")));
        let after = advance_round(&[again]);
        assert_eq!(after[0].cooldowns.len(), 1);
    }

    #[test]
    fn dangling_source_expires_quietly() {
        let mut p = subject(vec![]);
        p.effects.push(effect("Ghost", 1, TimeUnit::Round, Some("gone")));
        let after = advance_round(&[p]);
        assert!(after[0].effects.is_empty());
        assert!(after[0].cooldowns.is_empty());
    }

    #[test]
    fn action_timers_tick_by_cost_and_clamp() {
        let mut p = subject(vec![]);
        p.cooldowns.push(cooldown("Dash", 5, TimeUnit::Action));
        p.effects.push(effect("Surge", 3, TimeUnit::Action, None));
        p.effects.push(effect("Stance", 4, TimeUnit::Round, None));

        let after = tick_action_timers(&p, 3);
        assert_eq!(after.cooldowns[0].remaining, 2);
        // Surge hit zero and expired; the round-unit effect is untouched.
        assert_eq!(after.effects.len(), 1);
        assert_eq!(after.effects[0].name, "Stance");

        let after = tick_action_timers(&after, 4);
        assert!(after.cooldowns.is_empty());
        assert_eq!(after.effects[0].remaining, 4);
    }

    #[test]
    fn duration_ability_applies_effect_and_linked_passives() {
        let mut ab = ability("ab-1", "War Shout");
        ab.duration = 3;
        ab.tags = tagv(&["buff"]);
        ab.bonuses = vec![BonusEntry::new("cleanb", 2)];
        let mut p = subject(vec![ab]);
        p.passives.push(Passive {
            name: "Echoing Voice".into(),
            tags: tagv(&["soul"]),
            bonus: 1,
            trigger: PassiveTrigger::Ability,
            target_ability: Some("war shout".into()),
        });

        let after = commit_use(&p, "ab-1");
        assert_eq!(after.effects.len(), 2);
        assert_eq!(after.effects[0].name, "War Shout");
        assert_eq!(after.effects[0].remaining, 3);
        assert_eq!(after.effects[0].source.as_deref(), Some("ab-1"));
        assert_eq!(after.effects[1].name, "Echoing Voice");
        assert_eq!(after.effects[1].remaining, 3);
        // No immediate cooldown for duration-bearing abilities.
        assert!(after.cooldowns.is_empty());
    }

    #[test]
    fn cooldown_ability_locks_immediately() {
        let mut ab = ability("ab-1", "Slam");
        ab.cooldown = 2;
        let p = subject(vec![ab]);

        let after = commit_use(&p, "ab-1");
        assert_eq!(after.cooldowns.len(), 1);
        assert_eq!(after.cooldowns[0].remaining, 2);

        // Using it again while locked does not stack a second entry.
        let after = commit_use(&after, "ab-1");
        assert_eq!(after.cooldowns.len(), 1);
    }

    #[test]
    fn usage_limit_spawns_cooldown_at_the_limit() {
        let mut ab = ability("ab-1", "Riposte");
        ab.limit = 2;
        ab.limit_unit = TimeUnit::Round;
        ab.cooldown = 1;
        let p = subject(vec![ab]);

        let once = commit_use(&p, "ab-1");
        assert_eq!(once.uses_of("Riposte"), 1);
        assert!(once.cooldowns.is_empty());

        let twice = commit_use(&once, "ab-1");
        assert_eq!(twice.uses_of("Riposte"), 2);
        assert_eq!(twice.cooldowns.len(), 1);
    }

    #[test]
    fn partial_use_earns_the_cooldown_at_round_end() {
        let mut ab = ability("ab-1", "Riposte");
        ab.limit = 3;
        ab.limit_unit = TimeUnit::Round;
        ab.cooldown = 2;
        let p = subject(vec![ab]);

        let used_once = commit_use(&p, "ab-1");
        let after = advance_round(&[used_once]);
        // Spawned in the same pass the round clock ticks, so one round has
        // already elapsed on it.
        assert_eq!(after[0].cooldowns.len(), 1);
        assert_eq!(after[0].cooldowns[0].remaining, 1);
        assert_eq!(after[0].uses_of("Riposte"), 0);
    }

    #[test]
    fn unknown_ability_commit_is_a_no_op() {
        let p = subject(vec![]);
        let after = commit_use(&p, "nope");
        assert_eq!(after, p);
    }

    #[test]
    fn commit_sequence_ticks_by_ability_cost() {
        let mut slam = ability("slam", "Slam");
        slam.cost = 2;
        slam.cooldown = 3;
        let mut p = subject(vec![slam]);
        p.cooldowns.push(cooldown("Dash", 2, TimeUnit::Action));

        let nodes = vec![SequenceNode::Action(ActionNode::new(ParticipantId(0), "slam"))];
        let after = commit_sequence(&nodes, &[p]);

        // Dash ticked down by Slam's cost and dropped; Slam's own lockout
        // appeared afterwards, untouched by the tick.
        assert_eq!(after[0].cooldowns.len(), 1);
        assert_eq!(after[0].cooldowns[0].name, "Slam");
        assert_eq!(after[0].cooldowns[0].remaining, 3);
    }
}
