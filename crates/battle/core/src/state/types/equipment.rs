//! Equipped items.

use super::ability::BonusEntry;

/// A weapon a participant can act with.
///
/// An action resolves with at most one weapon; its tags join the ability's
/// tags to form the merged tag set, and its bonus entries apply only when
/// their stat token rides on a stat the action already uses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub tags: Vec<String>,
    pub bonuses: Vec<BonusEntry>,
    pub equipped: bool,
}

/// A worn item with a flat bonus.
///
/// Contributes through the modifier aggregator when equipped and its tags
/// overlap the action's tags; unequipped wearables never contribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wearable {
    pub name: String,
    pub tags: Vec<String>,
    pub bonus: i32,
    pub equipped: bool,
}
