//! Content loaders for reading battle data from files.
//!
//! Loaders convert RON files into `battle-core` values using the document
//! shapes in [`crate::formats`]. Load failures are real errors — the silent
//! degradation of the engine starts only once data is in memory.

pub mod roster;
pub mod rules;

pub use roster::RosterLoader;
pub use rules::RulesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
