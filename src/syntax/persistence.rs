//! On-disk persistence of the accumulated state
//!
//! The file holds the nine category lists as plain JSON string arrays.
//! Callers merge a loaded state (see [`Accumulator::restore`]) rather than
//! replacing the live one.
//!
//! [`Accumulator::restore`]: super::accumulator::Accumulator::restore

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::analysis::AccumulatedSyntaxState;
use crate::error::Result;

/// Write `state` to `path` atomically
pub fn save_state(path: &Path, state: &AccumulatedSyntaxState) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, state)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    info!("Saved syntax state to {}", path.display());
    Ok(())
}

/// Read a state written by [`save_state`], normalizing its entries
///
/// A missing file yields an empty state.
pub fn load_state(path: &Path) -> Result<AccumulatedSyntaxState> {
    if !path.exists() {
        debug!("No syntax state at {}, starting empty", path.display());
        return Ok(AccumulatedSyntaxState::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let state: AccumulatedSyntaxState = serde_json::from_reader(reader)?;
    // Hand-edited files may carry uppercase or curly apostrophes
    Ok(AccumulatedSyntaxState::from_analysis(state.normalized()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxError;
    use crate::syntax::accumulator::Accumulator;
    use crate::syntax::analysis::SyntaxAnalysis;
    use crate::syntax::category::Category;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut analysis = SyntaxAnalysis::empty();
        analysis.insert(Category::Nouns, "dog");
        analysis.insert(Category::Interjections, "wow");
        let mut acc = Accumulator::new();
        acc.apply(&analysis);

        save_state(&path, acc.state()).unwrap();
        let loaded = load_state(&path).unwrap();
        assert_eq!(&loaded, acc.state());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["nouns"], serde_json::json!(["dog"]));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let state = load_state(&dir.path().join("absent.json")).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_loaded_entries_are_normalized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"nouns": ["Dog", "dog", "  "], "verbs": ["Don\u2019t"], "articles": ["THE"]}"#,
        )
        .unwrap();

        let state = load_state(&path).unwrap();
        assert_eq!(state.nouns, vec!["dog"]);
        assert_eq!(state.verbs, vec!["don't"]);
        assert_eq!(state.articles, vec!["the"]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_state(&path),
            Err(SyntaxError::Serialization(_))
        ));
    }
}
