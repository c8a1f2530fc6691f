//! Total roll bonus for one action.
//!
//! Combines ability base bonuses, live stat values, gated weapon bonuses,
//! and the modifier aggregator's output into one signed number, with the
//! dice-pool label computed alongside from the acting participant's level.

use crate::config::BattleConfig;
use crate::resolve::factors::{self, Factor};
use crate::resolve::stat::live_stat;
use crate::state::{Ability, InjuryTable, Participant, Weapon};
use crate::tags::{self, StatKind};

/// Resolved bonus math for one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollBreakdown {
    /// Signed total added to the manual roll.
    pub total: i32,
    /// Dice-pool label, e.g. `2d100`.
    pub dice: &'static str,
    /// Matching modifiers that survived the exclusion list.
    pub factors: Vec<Factor>,
}

/// Dice pool from participant level.
pub fn dice_pool(level: i32) -> &'static str {
    if level >= BattleConfig::TRIPLE_DICE_LEVEL {
        "3d100"
    } else if level >= BattleConfig::DOUBLE_DICE_LEVEL {
        "2d100"
    } else {
        "1d100"
    }
}

/// Full bonus resolution for one action.
///
/// 1. The used-stat set starts from the merged tags and grows with every
///    stat named by an ability bonus entry.
/// 2. Each ability entry always adds its raw value; a recognized stat token
///    additionally injects the live stat. A `cleanb` token adds the raw
///    value alone. The double contribution (live stat *and* raw value on the
///    same entry) is ruleset behavior and must stay.
/// 3. Weapon entries add their raw value only when their token is `cleanb`,
///    the wildcard, or a stat already marked used.
/// 4. Every aggregator factor not named in `excluded` adds its bonus.
pub fn roll_breakdown(
    participant: &Participant,
    ability: &Ability,
    weapon: Option<&Weapon>,
    rules: &InjuryTable,
    excluded: &[String],
    opponent_tags: Option<&[String]>,
    merged_tags: &[String],
) -> RollBreakdown {
    let mut used = tags::stats_used(merged_tags);
    let mut total = 0;

    for entry in &ability.bonuses {
        total += entry.value;
        if tags::canon(&entry.stat) == tags::CLEAN_BONUS_TOKEN {
            continue;
        }
        if let Some(kind) = StatKind::from_token(&entry.stat) {
            total += live_stat(participant, kind, rules);
            used.mark(kind);
        }
    }

    if let Some(weapon) = weapon {
        for entry in &weapon.bonuses {
            let token = tags::canon(&entry.stat);
            let applies = token == tags::CLEAN_BONUS_TOKEN
                || tags::is_wildcard_token(&token)
                || StatKind::from_token(&token).is_some_and(|kind| used.has(kind));
            if applies {
                total += entry.value;
            }
        }
    }

    let mut factors =
        factors::matching_factors(participant, merged_tags, &ability.name, opponent_tags);
    factors.retain(|factor| !excluded.iter().any(|name| tags::canon_eq(name, &factor.name)));
    for factor in &factors {
        total += factor.bonus;
    }

    RollBreakdown {
        total,
        dice: dice_pool(participant.level),
        factors,
    }
}

/// The signed bonus alone; see [`roll_breakdown`] for the full math.
pub fn total_bonus(
    participant: &Participant,
    ability: &Ability,
    weapon: Option<&Weapon>,
    rules: &InjuryTable,
    excluded: &[String],
    opponent_tags: Option<&[String]>,
    merged_tags: &[String],
) -> i32 {
    roll_breakdown(
        participant,
        ability,
        weapon,
        rules,
        excluded,
        opponent_tags,
        merged_tags,
    )
    .total
}
