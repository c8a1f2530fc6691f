use std::fmt;

/// Unique identifier for a participant within one battle.
///
/// Instance ids never repeat inside a battle; the character template a
/// participant was flattened from may appear several times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier for a timed entry (effect or cooldown).
///
/// Allocated from a per-participant monotonic counter so that resolution
/// stays deterministic — no RNG, no UUIDs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerId(pub u32);

/// The two overlapping clocks a timed entry can run on.
///
/// Round-unit entries tick once per [`crate::timeline::advance_round`];
/// action-unit entries tick by the spent action-point cost.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TimeUnit {
    #[default]
    Round,
    Action,
}
