//! Roster loader and participant flattening.
//!
//! Characters enter a battle as flattened [`Participant`]s: template
//! abilities, passives, and equipment are copied onto the instance and a
//! fresh instance id is allocated per battle slot. The same template may
//! join a battle any number of times.

use std::path::Path;

use anyhow::Context;
use battle_core::{Participant, ParticipantId};
use tracing::info;

use crate::formats::{CharacterDoc, RosterDoc};
use crate::loaders::{LoadResult, read_file};

/// Loader for battle rosters.
pub struct RosterLoader;

impl RosterLoader {
    /// Loads a roster file and flattens it into participants.
    pub fn load(path: &Path) -> LoadResult<Vec<Participant>> {
        let raw = read_file(path)?;
        let doc: RosterDoc =
            ron::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;
        let participants = Self::from_docs(doc.characters);
        info!(participants = participants.len(), "loaded roster");
        Ok(participants)
    }

    /// Flattens character documents into participants with sequential
    /// instance ids.
    pub fn from_docs(characters: Vec<CharacterDoc>) -> Vec<Participant> {
        characters
            .into_iter()
            .enumerate()
            .map(|(slot, doc)| Self::flatten(ParticipantId(slot as u32), doc))
            .collect()
    }

    fn flatten(id: ParticipantId, doc: CharacterDoc) -> Participant {
        let mut participant = Participant::new(id, doc.name);
        participant.template_id = doc.template_id;
        participant.level = doc.level;
        participant.stats = doc.stats.into();
        participant.abilities = doc.abilities.into_iter().map(Into::into).collect();
        participant.passives = doc.passives.into_iter().map(Into::into).collect();
        participant.weapons = doc.weapons.into_iter().map(Into::into).collect();
        participant.wearables = doc.wearables.into_iter().map(Into::into).collect();
        participant.injuries = doc.injuries.into_iter().map(Into::into).collect();
        participant
    }
}
