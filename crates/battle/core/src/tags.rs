//! Canonical semantic-tag lexicon.
//!
//! Every component that looks at tags goes through this module: the stat
//! resolver, the modifier aggregator, the bonus calculator, and the sequence
//! evaluator all share one normalization rule and one set of marker tables.
//! Tag comparison is case-insensitive and trimmed; class membership is a
//! substring match against the marker tables below, so `melee_strike`
//! counts as offensive and `wound_phys` counts as a Physique tag.
//!
//! The vocabulary is fixed to one ruleset; synonyms live in the marker
//! tables, nowhere else.

use strum::IntoEnumIterator;

// ============================================================================
// Marker tables
// ============================================================================

const OFFENSIVE_MARKERS: &[&str] = &[
    "attack", "strike", "hit", "damage", "melee", "ranged", "offense",
];

const DEFENSIVE_MARKERS: &[&str] = &[
    "defense", "block", "dodge", "protection", "parry", "guard",
];

/// Reaction markers that keep the previous offensive context alive
/// (a dodge roll must not overwrite the tags of the attack it answers).
const PRESERVING_MARKERS: &[&str] = &["dodge", "evade", "movement", "defense", "block", "parry"];

const FORM_MARKERS: &[&str] = &["form", "stance"];

const BUFF_MARKERS: &[&str] = &["buff", "boost", "blessing"];

/// Bonus-entry token that contributes its raw value with no stat injection.
pub const CLEAN_BONUS_TOKEN: &str = "cleanb";

// ============================================================================
// Normalization
// ============================================================================

/// Canonical form of a tag: trimmed, ASCII-lowercased.
pub fn canon(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

/// Case-insensitive, trimmed equality.
pub fn canon_eq(a: &str, b: &str) -> bool {
    canon(a) == canon(b)
}

/// Non-empty intersection of two tag sets under canonical comparison.
pub fn overlaps(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.iter().any(|y| canon_eq(x, y)))
}

/// True if the bonus-entry token is the wildcard (empty or `any`).
pub fn is_wildcard_token(token: &str) -> bool {
    let c = canon(token);
    c.is_empty() || c == "any"
}

fn has_marker(tags: &[String], markers: &[&str]) -> bool {
    tags.iter().any(|tag| {
        let c = canon(tag);
        markers.iter().any(|marker| c.contains(marker))
    })
}

// ============================================================================
// Tag classes
// ============================================================================

bitflags::bitflags! {
    /// Semantic classes a tag set belongs to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TagClasses: u8 {
        /// Marks the action as an attack for `OnHit` passives and context threading.
        const OFFENSIVE = 1 << 0;
        /// Marks the action as defensive for `OnDefense` passives.
        const DEFENSIVE = 1 << 1;
        /// Renders as a form: `<Name>`.
        const FORM = 1 << 2;
        /// Renders as a buff: `(Name)`.
        const BUFF = 1 << 3;
        /// Reaction; the previous offensive context survives this action.
        const PRESERVING = 1 << 4;
    }
}

/// Classifies a tag set against all marker tables in one pass.
pub fn classes(tags: &[String]) -> TagClasses {
    let mut out = TagClasses::empty();
    if has_marker(tags, OFFENSIVE_MARKERS) {
        out |= TagClasses::OFFENSIVE;
    }
    if has_marker(tags, DEFENSIVE_MARKERS) {
        out |= TagClasses::DEFENSIVE;
    }
    if has_marker(tags, FORM_MARKERS) {
        out |= TagClasses::FORM;
    }
    if has_marker(tags, BUFF_MARKERS) {
        out |= TagClasses::BUFF;
    }
    if has_marker(tags, PRESERVING_MARKERS) {
        out |= TagClasses::PRESERVING;
    }
    out
}

/// How an action body is rendered in the narration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderKind {
    /// `<Name>` — a stance change, no roll.
    Form,
    /// `(Name)` — a self-applied effect, no roll.
    Buff,
    /// `Name(dice+bonus)` — a rolled action.
    Roll,
}

impl TagClasses {
    /// Display classification; form wins over buff, everything else rolls.
    pub fn render_kind(self) -> RenderKind {
        if self.contains(TagClasses::FORM) {
            RenderKind::Form
        } else if self.contains(TagClasses::BUFF) {
            RenderKind::Buff
        } else {
            RenderKind::Roll
        }
    }
}

// ============================================================================
// Stat kinds
// ============================================================================

/// The three base stats of the ruleset.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    /// Bodily power and resilience.
    Physique,
    /// Wits, focus, reasoning.
    Mind,
    /// Willpower and presence.
    Soul,
}

impl StatKind {
    /// Substring markers that tie a tag or bonus-entry token to this stat.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            StatKind::Physique => &["phys", "melee", "might"],
            StatKind::Mind => &["mind", "wits", "focus"],
            StatKind::Soul => &["soul", "spirit", "will"],
        }
    }

    /// True if the canonical tag carries one of this stat's markers.
    pub fn matches_tag(self, tag: &str) -> bool {
        let c = canon(tag);
        self.markers().iter().any(|marker| c.contains(marker))
    }

    /// Resolves a bonus-entry stat token to a stat kind, if recognized.
    ///
    /// The wildcard and `cleanb` tokens are not stats and resolve to `None`.
    pub fn from_token(token: &str) -> Option<StatKind> {
        let c = canon(token);
        if c.is_empty() || c == "any" || c == CLEAN_BONUS_TOKEN {
            return None;
        }
        StatKind::iter().find(|kind| kind.markers().iter().any(|marker| c.contains(marker)))
    }

    fn flag(self) -> StatSet {
        match self {
            StatKind::Physique => StatSet::PHYSIQUE,
            StatKind::Mind => StatSet::MIND,
            StatKind::Soul => StatSet::SOUL,
        }
    }
}

bitflags::bitflags! {
    /// Set of stats an action "uses", for weapon-bonus gating.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct StatSet: u8 {
        const PHYSIQUE = 1 << 0;
        const MIND = 1 << 1;
        const SOUL = 1 << 2;
    }
}

impl StatSet {
    /// Marks a stat as used.
    pub fn mark(&mut self, kind: StatKind) {
        *self |= kind.flag();
    }

    /// True if the stat was marked used.
    pub fn has(self, kind: StatKind) -> bool {
        self.contains(kind.flag())
    }
}

/// Stats an action uses, inferred from its merged tags.
pub fn stats_used(tags: &[String]) -> StatSet {
    let mut set = StatSet::empty();
    for kind in StatKind::iter() {
        if tags.iter().any(|tag| kind.matches_tag(tag)) {
            set.mark(kind);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn comparison_is_case_insensitive_and_trimmed() {
        assert!(canon_eq("  Fire ", "fire"));
        assert!(overlaps(&tags(&["Fire", "Melee"]), &tags(&[" fire "])));
        assert!(!overlaps(&tags(&["fire"]), &tags(&["ice"])));
    }

    #[test]
    fn classes_match_by_substring() {
        let c = classes(&tags(&["Melee_Strike"]));
        assert!(c.contains(TagClasses::OFFENSIVE));
        assert!(!c.contains(TagClasses::DEFENSIVE));

        let c = classes(&tags(&["battle_stance"]));
        assert_eq!(c.render_kind(), RenderKind::Form);
    }

    #[test]
    fn dodge_preserves_and_defends() {
        let c = classes(&tags(&["dodge"]));
        assert!(c.contains(TagClasses::PRESERVING));
        assert!(c.contains(TagClasses::DEFENSIVE));
    }

    #[test]
    fn stat_tokens_resolve() {
        assert_eq!(StatKind::from_token("phys"), Some(StatKind::Physique));
        assert_eq!(StatKind::from_token(" Spirit "), Some(StatKind::Soul));
        assert_eq!(StatKind::from_token("cleanb"), None);
        assert_eq!(StatKind::from_token("any"), None);
        assert_eq!(StatKind::from_token(""), None);
    }

    #[test]
    fn stats_used_comes_from_tags() {
        let used = stats_used(&tags(&["melee", "focus_art"]));
        assert!(used.has(StatKind::Physique));
        assert!(used.has(StatKind::Mind));
        assert!(!used.has(StatKind::Soul));
    }
}
