//! Lyric prompt catalog
//!
//! Prompts are served in catalog order and wrap around, so prompt `i` is
//! entry `i % len` with id `lyric_{i}`.
//!
//! Catalogs can be loaded from TOML:
//! ```toml
//! [[lyrics]]
//! lyric_text = "I'm moving fast like a flash of ___"
//! options = ["trash", "cash", "dash"]
//! correct_rhyme = "dash"
//! beat_timing = 1.0
//! ```

use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const LYRIC_ID_PREFIX: &str = "lyric_";

/// One lyric line with its answer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricEntry {
    /// Line with `___` marking the blank
    pub lyric_text: String,
    pub options: Vec<String>,
    pub correct_rhyme: String,
    /// Beat position in seconds from the start of the prompt
    pub beat_timing: f64,
}

impl LyricEntry {
    fn new(lyric_text: &str, options: [&str; 3], correct_rhyme: &str, beat_timing: f64) -> Self {
        Self {
            lyric_text: lyric_text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_rhyme: correct_rhyme.to_string(),
            beat_timing,
        }
    }
}

/// A catalog entry as served to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricPrompt {
    pub lyric_id: String,
    pub lyric_text: String,
    pub options: Vec<String>,
    pub correct_rhyme: String,
    pub beat_timing: f64,
}

/// Ordered, non-empty set of lyric entries
#[derive(Debug, Clone, PartialEq)]
pub struct LyricCatalog {
    entries: Vec<LyricEntry>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    lyrics: Vec<LyricEntry>,
}

impl LyricCatalog {
    /// Build a catalog; an empty list is rejected
    pub fn new(entries: Vec<LyricEntry>) -> GameResult<Self> {
        if entries.is_empty() {
            return Err(GameError::InvalidInput("Lyric catalog must not be empty".to_string()));
        }
        Ok(Self { entries })
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(content: &str) -> GameResult<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(rr_common::Error::from)?;
        Self::new(file.lyrics)
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> GameResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            rr_common::Error::Config(format!(
                "Failed to read lyric catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        let catalog = Self::from_toml_str(&content)?;
        info!(path = %path.display(), lyrics = catalog.len(), "Loaded lyric catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prompt for the `index`-th round of a session
    pub fn prompt(&self, index: usize) -> LyricPrompt {
        let entry = &self.entries[index % self.entries.len()];
        LyricPrompt {
            lyric_id: format!("{}{}", LYRIC_ID_PREFIX, index),
            lyric_text: entry.lyric_text.clone(),
            options: entry.options.clone(),
            correct_rhyme: entry.correct_rhyme.clone(),
            beat_timing: entry.beat_timing,
        }
    }

    /// Entry behind a prompt id, if the id is well-formed
    pub fn find(&self, lyric_id: &str) -> Option<&LyricEntry> {
        let index: usize = lyric_id.strip_prefix(LYRIC_ID_PREFIX)?.parse().ok()?;
        self.entries.get(index % self.entries.len())
    }
}

impl Default for LyricCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                LyricEntry::new(
                    "I'm moving fast like a flash of ___",
                    ["trash", "cash", "dash"],
                    "dash",
                    1.0,
                ),
                LyricEntry::new(
                    "The rhythm flows like a river of ___",
                    ["gold", "soul", "flow"],
                    "flow",
                    1.2,
                ),
                LyricEntry::new(
                    "My words hit hard like a hammer of ___",
                    ["steel", "feel", "real"],
                    "steel",
                    0.8,
                ),
            ],
        }
    }
}
