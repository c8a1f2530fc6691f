//! Injury ruleset loader.
//!
//! Loads injury penalty rules from RON data files into an
//! [`InjuryTable`]. The default ruleset ships embedded with the crate.

use std::path::Path;

use anyhow::Context;
use battle_core::InjuryTable;
use tracing::info;

use crate::formats::RulesetDoc;
use crate::loaders::{LoadResult, read_file};

/// Loader for the static injury ruleset.
pub struct RulesLoader;

impl RulesLoader {
    /// Loads the embedded default ruleset.
    pub fn load_default() -> LoadResult<InjuryTable> {
        let raw = include_str!("../../data/rules/injuries.ron");
        Self::from_str(raw).context("Failed to parse embedded injuries.ron")
    }

    /// Loads a ruleset from an external RON file.
    pub fn load(path: &Path) -> LoadResult<InjuryTable> {
        let raw = read_file(path)?;
        Self::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn from_str(raw: &str) -> LoadResult<InjuryTable> {
        let doc: RulesetDoc = ron::from_str(raw)?;
        let table = InjuryTable::from_rules(doc.injuries.into_iter().map(Into::into).collect())?;
        info!(rules = table.rules().len(), "loaded injury ruleset");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_ruleset_parses() {
        let table = RulesLoader::load_default().expect("Failed to load default ruleset");
        assert!(!table.rules().is_empty());
        // The stacked bruise rule is part of the shipped ruleset.
        let bruise = table.rule_for("bruise_phys").expect("bruise rule missing");
        assert_eq!(bruise.stack, Some(3));
    }

    #[test]
    fn external_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(injuries: [(tag: "burn_soul", label: "Burn", value: -3)])"#
        )
        .unwrap();

        let table = RulesLoader::load(file.path()).unwrap();
        assert_eq!(table.rules().len(), 1);
        assert_eq!(table.rule_for("burn_soul").unwrap().value, -3);
    }

    #[test]
    fn duplicate_tags_fail_the_load() {
        let raw = r#"(injuries: [
            (tag: "wound_phys", value: -5),
            (tag: "Wound_Phys", value: -10),
        ])"#;
        assert!(RulesLoader::from_str(raw).is_err());
    }

    #[test]
    fn string_values_coerce() {
        let raw = r#"(injuries: [
            (tag: "wound_phys", value: "-5"),
            (tag: "strain_mind", value: "junk"),
        ])"#;
        let table = RulesLoader::from_str(raw).unwrap();
        assert_eq!(table.rule_for("wound_phys").unwrap().value, -5);
        assert_eq!(table.rule_for("strain_mind").unwrap().value, 0);
    }
}
