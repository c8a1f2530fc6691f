//! Injuries and the static injury ruleset.

use crate::tags;

/// One wound instance on a participant.
///
/// Injuries carry a tag only; the penalty math lives in the ruleset so a
/// balance change never touches stored battles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Injury {
    pub tag: String,
    pub label: String,
}

impl Injury {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: String::new(),
        }
    }
}

/// Penalty rule for one injury tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InjuryRule {
    pub tag: String,
    pub label: String,
    /// Penalty per application, usually negative.
    pub value: i32,
    /// Injuries of this tag required before the penalty applies once.
    /// `None` applies the penalty per instance.
    pub stack: Option<u32>,
}

/// Errors raised when assembling an injury ruleset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// Two rules share a canonical tag; lookup would be ambiguous.
    #[error("duplicate injury rule for tag `{tag}`")]
    DuplicateTag { tag: String },
}

/// Static, per-ruleset table of injury penalty rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InjuryTable {
    rules: Vec<InjuryRule>,
}

impl InjuryTable {
    /// Empty table; every injury then contributes zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table, rejecting rules whose canonical tags collide.
    pub fn from_rules(rules: Vec<InjuryRule>) -> Result<Self, RulesError> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| tags::canon_eq(&r.tag, &rule.tag)) {
                return Err(RulesError::DuplicateTag {
                    tag: tags::canon(&rule.tag),
                });
            }
        }
        Ok(Self { rules })
    }

    /// Looks up the rule for an injury tag under canonical comparison.
    pub fn rule_for(&self, tag: &str) -> Option<&InjuryRule> {
        self.rules.iter().find(|rule| tags::canon_eq(&rule.tag, tag))
    }

    pub fn rules(&self) -> &[InjuryRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_canonical_tags_rejected() {
        let rules = vec![
            InjuryRule {
                tag: "wound_phys".into(),
                label: "Wound".into(),
                value: -5,
                stack: None,
            },
            InjuryRule {
                tag: " Wound_Phys ".into(),
                label: "Wound again".into(),
                value: -10,
                stack: None,
            },
        ];
        assert!(matches!(
            InjuryTable::from_rules(rules),
            Err(RulesError::DuplicateTag { .. })
        ));
    }

    #[test]
    fn lookup_is_canonical() {
        let table = InjuryTable::from_rules(vec![InjuryRule {
            tag: "wound_phys".into(),
            label: "Wound".into(),
            value: -5,
            stack: None,
        }])
        .unwrap();
        assert!(table.rule_for(" WOUND_PHYS ").is_some());
        assert!(table.rule_for("burn_soul").is_none());
    }
}
