//! Live stat values under stacked-injury penalties.

use std::collections::BTreeMap;

use crate::state::{InjuryTable, Participant};
use crate::tags::{self, StatKind};

/// Live-adjusted stat value after injury penalties.
///
/// Groups the participant's injuries by canonical tag, keeps the tags whose
/// markers match the requested stat kind, and applies each tag's ruleset
/// penalty:
///
/// ```text
/// stacked  (stack = s): penalty = floor(count / s) * value
/// unstacked:            penalty = count * value
/// ```
///
/// Below a stack threshold the tag contributes zero. Tags without a rule
/// contribute zero. Pure; no side effects.
pub fn live_stat(participant: &Participant, kind: StatKind, rules: &InjuryTable) -> i32 {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for injury in &participant.injuries {
        *counts.entry(tags::canon(&injury.tag)).or_insert(0) += 1;
    }

    let mut value = participant.stats.get(kind);
    for (tag, count) in counts {
        if !kind.matches_tag(&tag) {
            continue;
        }
        let Some(rule) = rules.rule_for(&tag) else {
            continue;
        };
        let applications = match rule.stack {
            Some(stack) if stack > 0 => count / stack,
            _ => count,
        };
        value += applications as i32 * rule.value;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Injury, InjuryRule, ParticipantId};

    fn rules() -> InjuryTable {
        InjuryTable::from_rules(vec![
            InjuryRule {
                tag: "wound_phys".into(),
                label: "Wound".into(),
                value: -5,
                stack: None,
            },
            InjuryRule {
                tag: "bruise_phys".into(),
                label: "Bruise".into(),
                value: -10,
                stack: Some(3),
            },
            InjuryRule {
                tag: "strain_mind".into(),
                label: "Strain".into(),
                value: -2,
                stack: None,
            },
        ])
        .unwrap()
    }

    fn wounded(tags: &[&str]) -> Participant {
        let mut p = Participant::new(ParticipantId(0), "Subject");
        p.stats.physique = 12;
        p.injuries = tags.iter().map(|t| Injury::new(*t)).collect();
        p
    }

    #[test]
    fn uninjured_stat_passes_through() {
        let p = wounded(&[]);
        assert_eq!(live_stat(&p, StatKind::Physique, &rules()), 12);
    }

    #[test]
    fn unstacked_penalty_applies_per_instance() {
        let p = wounded(&["wound_phys", "wound_phys"]);
        assert_eq!(live_stat(&p, StatKind::Physique, &rules()), 12 - 10);
    }

    #[test]
    fn stacked_penalty_needs_the_full_stack() {
        let two = wounded(&["bruise_phys", "bruise_phys"]);
        assert_eq!(live_stat(&two, StatKind::Physique, &rules()), 12);

        let three = wounded(&["bruise_phys", "bruise_phys", "bruise_phys"]);
        assert_eq!(live_stat(&three, StatKind::Physique, &rules()), 12 - 10);
    }

    #[test]
    fn other_stats_unaffected() {
        let p = wounded(&["wound_phys"]);
        assert_eq!(live_stat(&p, StatKind::Mind, &rules()), 10);
    }

    #[test]
    fn unruled_tags_contribute_zero() {
        let p = wounded(&["curse_phys"]);
        assert_eq!(live_stat(&p, StatKind::Physique, &rules()), 12);
    }
}
