//! Sequence evaluation and narration assembly.
//!
//! The walk is deterministic, left to right and depth first; later siblings
//! depend on the tag context earlier siblings leave behind. A bad reference
//! degrades to an `[Unknown Action]` placeholder instead of aborting, so one
//! stale node can never corrupt a whole commit.

use tracing::debug;

use crate::config::BattleConfig;
use crate::resolve::bonus::{RollBreakdown, roll_breakdown};
use crate::sequence::node::{ActionNode, ComboNode, ConditionNode, SequenceNode};
use crate::state::{Ability, InjuryTable, Participant};
use crate::tags::{self, RenderKind, TagClasses};

const UNKNOWN_ACTION: &str = "[Unknown Action]";

/// Read-only evaluation environment.
struct ResolveEnv<'a> {
    participants: &'a [Participant],
    rules: &'a InjuryTable,
}

/// Resolves a queued sequence into its narration.
///
/// Top-level fragments share a line joined by ` - `; each new line starts
/// with `> `. A divider closes the current paragraph (layout only — the
/// running tag context is untouched). Paragraphs are separated by a blank
/// line.
pub fn resolve_sequence(
    nodes: &[SequenceNode],
    participants: &[Participant],
    rules: &InjuryTable,
) -> String {
    let env = ResolveEnv {
        participants,
        rules,
    };
    let mut last_tags: Vec<String> = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut line: Option<String> = None;

    for node in nodes {
        if matches!(node, SequenceNode::Divider) {
            if let Some(done) = line.take() {
                paragraphs.push(done);
            }
            continue;
        }
        let Some(fragment) = render_node(&env, node, &mut last_tags) else {
            continue;
        };
        line = Some(match line.take() {
            Some(mut current) => {
                current.push_str(" - ");
                current.push_str(&fragment);
                current
            }
            None => format!("> {fragment}"),
        });
    }
    if let Some(done) = line {
        paragraphs.push(done);
    }
    paragraphs.join("\n\n")
}

fn render_node(
    env: &ResolveEnv<'_>,
    node: &SequenceNode,
    last_tags: &mut Vec<String>,
) -> Option<String> {
    match node {
        SequenceNode::Action(action) => Some(render_action(env, action, last_tags)),
        SequenceNode::Combo(combo) => Some(render_combo(env, combo, last_tags)),
        SequenceNode::Condition(condition) => Some(render_condition(env, condition, last_tags)),
        SequenceNode::LogicChain(conditions) => {
            let rendered: Vec<String> = conditions
                .iter()
                .map(|condition| render_condition(env, condition, last_tags))
                .collect();
            Some(format!("{{{}}}", rendered.join(" | ")))
        }
        // Dividers only shape top-level layout; inside a container they
        // render nothing.
        SequenceNode::Divider => None,
    }
}

/// A fully resolved action, before formatting.
struct ResolvedAction<'a> {
    participant: &'a Participant,
    ability: &'a Ability,
    breakdown: RollBreakdown,
    kind: RenderKind,
}

/// Resolves one action and advances the sibling tag context.
///
/// The context moves to this action's merged tags unless they carry a
/// context-preserving marker — a dodge rolled against an AOE must leave the
/// AOE's tags in place for the next reaction.
fn resolve_action<'a>(
    env: &'a ResolveEnv<'_>,
    node: &ActionNode,
    last_tags: &mut Vec<String>,
) -> Option<ResolvedAction<'a>> {
    let participant = env.participants.iter().find(|p| p.id == node.actor);
    let Some(participant) = participant else {
        debug!(actor = %node.actor, "sequence references a missing participant");
        return None;
    };
    let Some(ability) = participant.ability(&node.ability) else {
        debug!(actor = %node.actor, ability = %node.ability, "sequence references a missing ability");
        return None;
    };
    let weapon = node
        .weapon
        .as_deref()
        .and_then(|name| participant.equipped_weapon(name));

    let merged = ability.merged_tags(weapon);
    let opponent = (!last_tags.is_empty()).then_some(last_tags.as_slice());
    let breakdown = roll_breakdown(
        participant,
        ability,
        weapon,
        env.rules,
        &node.excluded,
        opponent,
        &merged,
    );
    let classes = tags::classes(&merged);
    let kind = classes.render_kind();

    if !merged.is_empty() && !classes.contains(TagClasses::PRESERVING) {
        *last_tags = merged;
    }

    Some(ResolvedAction {
        participant,
        ability,
        breakdown,
        kind,
    })
}

fn render_action(env: &ResolveEnv<'_>, node: &ActionNode, last_tags: &mut Vec<String>) -> String {
    let Some(resolved) = resolve_action(env, node, last_tags) else {
        return UNKNOWN_ACTION.to_string();
    };
    let body = match resolved.kind {
        RenderKind::Form => format!("<{}>", resolved.ability.name),
        RenderKind::Buff => format!("({})", resolved.ability.name),
        RenderKind::Roll => format!(
            "{}({}{:+})",
            resolved.ability.name, resolved.breakdown.dice, resolved.breakdown.total
        ),
    };
    let mut out = format!("{}: {}", resolved.participant.name, body);
    for factor in resolved.breakdown.factors.iter().filter(|f| f.visible) {
        out.push_str(&format!(" - {}({:+})", factor.name, factor.bonus));
    }
    out
}

/// Renders `[actor: name + actor: name(dice+bonus/dice+bonus)]`.
///
/// Forms and buffs keep their slot in the dice list as `-`; the visible
/// modifiers of both actions are appended once, deduped by name.
fn render_combo(env: &ResolveEnv<'_>, combo: &ComboNode, last_tags: &mut Vec<String>) -> String {
    let mut names: Vec<String> = Vec::new();
    let mut pools: Vec<String> = Vec::new();
    let mut modifiers: Vec<(String, i32)> = Vec::new();

    for node in combo.actions().iter().take(BattleConfig::MAX_COMBO_ACTIONS) {
        match resolve_action(env, node, last_tags) {
            None => {
                names.push(UNKNOWN_ACTION.to_string());
                pools.push("-".to_string());
            }
            Some(resolved) => {
                names.push(format!(
                    "{}: {}",
                    resolved.participant.name, resolved.ability.name
                ));
                pools.push(match resolved.kind {
                    RenderKind::Roll => {
                        format!("{}{:+}", resolved.breakdown.dice, resolved.breakdown.total)
                    }
                    RenderKind::Form | RenderKind::Buff => "-".to_string(),
                });
                for factor in resolved.breakdown.factors.iter().filter(|f| f.visible) {
                    if !modifiers.iter().any(|(name, _)| tags::canon_eq(name, &factor.name)) {
                        modifiers.push((factor.name.clone(), factor.bonus));
                    }
                }
            }
        }
    }

    let mut out = format!("[{}({})]", names.join(" + "), pools.join("/"));
    for (name, bonus) in modifiers {
        out.push_str(&format!(" - {name}({bonus:+})"));
    }
    out
}

fn render_condition(
    env: &ResolveEnv<'_>,
    condition: &ConditionNode,
    last_tags: &mut Vec<String>,
) -> String {
    let rendered: Vec<String> = condition
        .children
        .iter()
        .filter_map(|child| render_node(env, child, last_tags))
        .collect();
    format!("{}: {}", condition.label, rendered.join(" - "))
}
