//! Sequence tree nodes.

use crate::config::BattleConfig;
use crate::state::ParticipantId;

/// Errors raised when building sequence nodes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// A combo holds more actions than the ruleset allows.
    #[error("combo holds {found} actions, limit is {limit}")]
    ComboTooLarge { found: usize, limit: usize },
}

/// One node of a queued combat sequence.
///
/// Only [`SequenceNode::Action`] carries resolvable data; containers
/// recurse. Matching is exhaustive everywhere — adding a variant must be a
/// compile error at every consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequenceNode {
    /// A single resolvable action (leaf).
    Action(ActionNode),
    /// Up to two actions rolled together.
    Combo(ComboNode),
    /// A labeled branch of child nodes.
    Condition(ConditionNode),
    /// Sibling conditions rendered as alternatives.
    LogicChain(Vec<ConditionNode>),
    /// Paragraph break in the narration (leaf); never touches tag context.
    Divider,
}

/// A queued use of one ability, optionally through a weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionNode {
    pub actor: ParticipantId,
    /// Ability id on the actor.
    pub ability: String,
    /// Weapon name; resolves only while equipped.
    pub weapon: Option<String>,
    /// Modifier names the user toggled off for this action.
    pub excluded: Vec<String>,
}

impl ActionNode {
    pub fn new(actor: ParticipantId, ability: impl Into<String>) -> Self {
        Self {
            actor,
            ability: ability.into(),
            weapon: None,
            excluded: Vec::new(),
        }
    }

    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }
}

/// Up to [`BattleConfig::MAX_COMBO_ACTIONS`] actions resolved as one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboNode {
    actions: Vec<ActionNode>,
}

impl ComboNode {
    /// Builds a combo, rejecting oversized action lists.
    pub fn new(actions: Vec<ActionNode>) -> Result<Self, SequenceError> {
        if actions.len() > BattleConfig::MAX_COMBO_ACTIONS {
            return Err(SequenceError::ComboTooLarge {
                found: actions.len(),
                limit: BattleConfig::MAX_COMBO_ACTIONS,
            });
        }
        Ok(Self { actions })
    }

    pub fn actions(&self) -> &[ActionNode] {
        &self.actions
    }
}

/// A labeled branch: `label: children`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionNode {
    pub label: String,
    pub children: Vec<SequenceNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combo_rejects_more_than_two_actions() {
        let actions = (0..3)
            .map(|i| ActionNode::new(ParticipantId(i), "ab"))
            .collect();
        assert!(matches!(
            ComboNode::new(actions),
            Err(SequenceError::ComboTooLarge { found: 3, .. })
        ));
        assert!(ComboNode::new(vec![ActionNode::new(ParticipantId(0), "ab")]).is_ok());
    }
}
