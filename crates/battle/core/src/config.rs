/// Engine capacity constants and fixed ruleset thresholds.
pub struct BattleConfig;

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum simultaneous active effects per participant.
    pub const MAX_EFFECTS: usize = 16;
    /// Maximum simultaneous cooldowns per participant.
    pub const MAX_COOLDOWNS: usize = 16;

    // ===== ruleset thresholds =====
    /// A combo holds at most this many actions.
    pub const MAX_COMBO_ACTIONS: usize = 2;
    /// Participant level at which the dice pool grows to 3d100.
    pub const TRIPLE_DICE_LEVEL: i32 = 5;
    /// Participant level at which the dice pool grows to 2d100.
    pub const DOUBLE_DICE_LEVEL: i32 = 3;
}
