//! Lexicon data for the scoring engine
//!
//! Rhyme buckets, contextual cue words, tone categories, tone compatibility
//! pairs and beat thresholds. Everything here is read-only once a scorer has
//! been built from it.
//!
//! Buckets, categories and fallbacks are ordered sequences: scorers take the
//! first match, so order is part of the data.
//!
//! # TOML format
//! ```toml
//! [rhyme]
//! positive_cues = ["fast", "quick"]
//! negative_cues = ["slow", "stop"]
//! buckets = [
//!     { ending = "ash", words = ["dash", "flash", "cash"] },
//! ]
//!
//! [tone]
//! categories = [
//!     { name = "energetic", words = ["fast", "quick", "dash"] },
//! ]
//! fallbacks = [
//!     { tone = "energetic", cues = ["fast", "quick", "speed"] },
//! ]
//! compatible = [["energetic", "powerful"]]
//!
//! [beat]
//! perfect_ms = 100.0
//! good_ms = 250.0
//! acceptable_ms = 500.0
//! decay_window_ms = 1000.0
//! ```
//!
//! Missing sections fall back to the compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Tone assigned when nothing in the lexicon matches
pub const NEUTRAL_TONE: &str = "neutral";

const DEFAULT_RHYME_BUCKETS: &[(&str, &[&str])] = &[
    ("ash", &["dash", "flash", "cash", "trash", "splash"]),
    ("ow", &["flow", "soul", "gold", "bold", "cold"]),
    ("eel", &["steel", "feel", "real", "deal", "wheel"]),
    ("ing", &["sing", "ring", "wing", "thing", "bring"]),
    ("ight", &["light", "bright", "fight", "night", "sight"]),
    ("ay", &["day", "way", "say", "play", "stay"]),
    ("ee", &["free", "tree", "see", "me", "be"]),
    ("oo", &["cool", "pool", "rule", "tool", "fool"]),
];

const DEFAULT_POSITIVE_CUES: &[&str] =
    &["fast", "quick", "speed", "dash", "flash", "flow", "smooth"];
const DEFAULT_NEGATIVE_CUES: &[&str] = &["slow", "stop", "wait", "trash", "junk", "bad"];

const DEFAULT_TONE_CATEGORIES: &[(&str, &[&str])] = &[
    ("energetic", &["fast", "quick", "dash", "flash", "speed", "rush", "burst"]),
    ("smooth", &["flow", "smooth", "glide", "drift", "float", "wave"]),
    ("powerful", &["strong", "mighty", "force", "power", "steel", "hammer", "thunder"]),
    ("emotional", &["feel", "heart", "soul", "love", "pain", "joy", "tears"]),
    ("negative", &["trash", "junk", "waste", "bad", "wrong", "fail", "lose"]),
    ("positive", &["good", "great", "best", "win", "success", "gold", "shine"]),
];

const DEFAULT_TONE_FALLBACKS: &[(&str, &[&str])] = &[
    ("energetic", &["fast", "quick", "speed"]),
    ("smooth", &["flow", "smooth", "river"]),
    ("powerful", &["hard", "hit", "hammer"]),
];

const DEFAULT_COMPATIBLE_TONES: &[(&str, &str)] = &[
    ("energetic", "powerful"),
    ("smooth", "emotional"),
    ("positive", "energetic"),
    ("positive", "smooth"),
    ("negative", "emotional"),
];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn normalize_words(words: &mut Vec<String>) {
    for word in words.iter_mut() {
        *word = word.trim().to_lowercase();
    }
    words.retain(|w| !w.is_empty());
}

/// Words sharing a phonetic ending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhymeBucket {
    /// Ending shared by the bucket's words (e.g. "ash")
    pub ending: String,
    /// Member words, lower case
    pub words: Vec<String>,
}

impl RhymeBucket {
    pub fn new(ending: &str, words: &[&str]) -> Self {
        Self {
            ending: ending.to_string(),
            words: owned(words),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Members that do not end with the bucket's ending
    pub fn suffix_mismatches(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .filter(move |w| !w.ends_with(self.ending.as_str()))
            .map(String::as_str)
    }
}

/// Rhyme buckets plus the cue words used for contextual fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhymeLexicon {
    pub buckets: Vec<RhymeBucket>,
    pub positive_cues: Vec<String>,
    pub negative_cues: Vec<String>,
}

impl Default for RhymeLexicon {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_RHYME_BUCKETS
                .iter()
                .map(|(ending, words)| RhymeBucket::new(ending, words))
                .collect(),
            positive_cues: owned(DEFAULT_POSITIVE_CUES),
            negative_cues: owned(DEFAULT_NEGATIVE_CUES),
        }
    }
}

/// Named tone category and its representative words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneCategory {
    pub name: String,
    pub words: Vec<String>,
}

/// Keyword fallback consulted when no category word occurs in a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneFallback {
    pub tone: String,
    pub cues: Vec<String>,
}

/// Tone categories, context fallbacks and the compatibility table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneLexicon {
    pub categories: Vec<ToneCategory>,
    pub fallbacks: Vec<ToneFallback>,
    /// Unordered pairs of compatible tones
    pub compatible: Vec<(String, String)>,
}

impl ToneLexicon {
    /// Symmetric lookup in the compatibility table
    pub fn are_compatible(&self, a: &str, b: &str) -> bool {
        self.compatible
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}

impl Default for ToneLexicon {
    fn default() -> Self {
        Self {
            categories: DEFAULT_TONE_CATEGORIES
                .iter()
                .map(|(name, words)| ToneCategory {
                    name: name.to_string(),
                    words: owned(words),
                })
                .collect(),
            fallbacks: DEFAULT_TONE_FALLBACKS
                .iter()
                .map(|(tone, cues)| ToneFallback {
                    tone: tone.to_string(),
                    cues: owned(cues),
                })
                .collect(),
            compatible: DEFAULT_COMPATIBLE_TONES
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }
}

/// Timing bands in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatThresholds {
    pub perfect_ms: f64,
    pub good_ms: f64,
    pub acceptable_ms: f64,
    /// Offset at which the linear decay reaches zero
    pub decay_window_ms: f64,
}

impl Default for BeatThresholds {
    fn default() -> Self {
        Self {
            perfect_ms: 100.0,
            good_ms: 250.0,
            acceptable_ms: 500.0,
            decay_window_ms: 1000.0,
        }
    }
}

/// Complete lexicon used to build the scorers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub rhyme: RhymeLexicon,
    pub tone: ToneLexicon,
    pub beat: BeatThresholds,
}

impl Lexicon {
    /// Parse a lexicon from TOML text, normalize its words and validate it
    ///
    /// Returns the lexicon together with non-fatal warnings (see [`Lexicon::validate`]).
    pub fn from_toml_str(content: &str) -> Result<(Self, Vec<String>)> {
        let mut lexicon: Lexicon = toml::from_str(content)?;
        lexicon.normalize();
        let warnings = lexicon.validate()?;
        Ok((lexicon, warnings))
    }

    /// Load a lexicon file, logging any validation warnings
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read lexicon {}: {}", path.display(), e))
        })?;
        let (lexicon, warnings) = Self::from_toml_str(&content)?;
        for warning in &warnings {
            warn!(path = %path.display(), "{}", warning);
        }
        info!(
            path = %path.display(),
            rhyme_buckets = lexicon.rhyme.buckets.len(),
            tone_categories = lexicon.tone.categories.len(),
            "Loaded lexicon"
        );
        Ok(lexicon)
    }

    /// Lower-case and trim every word, dropping blanks
    pub fn normalize(&mut self) {
        for bucket in &mut self.rhyme.buckets {
            bucket.ending = bucket.ending.trim().to_lowercase();
            normalize_words(&mut bucket.words);
        }
        normalize_words(&mut self.rhyme.positive_cues);
        normalize_words(&mut self.rhyme.negative_cues);
        for category in &mut self.tone.categories {
            category.name = category.name.trim().to_lowercase();
            normalize_words(&mut category.words);
        }
        for fallback in &mut self.tone.fallbacks {
            fallback.tone = fallback.tone.trim().to_lowercase();
            normalize_words(&mut fallback.cues);
        }
        for (a, b) in &mut self.tone.compatible {
            *a = a.trim().to_lowercase();
            *b = b.trim().to_lowercase();
        }
    }

    /// Check structural invariants
    ///
    /// Empty bucket endings, empty category names and beat thresholds that are
    /// not strictly ascending are errors. Bucket members that do not end with
    /// their bucket's ending are tolerated and returned as warnings; the
    /// default data contains several (e.g. "soul" in "ow").
    pub fn validate(&self) -> Result<Vec<String>> {
        if let Some(bucket) = self.rhyme.buckets.iter().find(|b| b.ending.is_empty()) {
            return Err(Error::Config(format!(
                "Rhyme bucket with words {:?} has an empty ending",
                bucket.words
            )));
        }
        if self.tone.categories.iter().any(|c| c.name.is_empty())
            || self.tone.fallbacks.iter().any(|f| f.tone.is_empty())
        {
            return Err(Error::Config("Tone category names must not be empty".to_string()));
        }

        let beat = &self.beat;
        let ascending = beat.perfect_ms >= 0.0
            && beat.perfect_ms < beat.good_ms
            && beat.good_ms < beat.acceptable_ms;
        if !ascending {
            return Err(Error::Config(format!(
                "Beat thresholds must ascend: perfect {} < good {} < acceptable {}",
                beat.perfect_ms, beat.good_ms, beat.acceptable_ms
            )));
        }
        if beat.decay_window_ms.is_nan() || beat.decay_window_ms <= 0.0 {
            return Err(Error::Config(format!(
                "Beat decay window must be positive, got {}",
                beat.decay_window_ms
            )));
        }

        let warnings = self
            .rhyme
            .buckets
            .iter()
            .flat_map(|bucket| {
                bucket.suffix_mismatches().map(move |word| {
                    format!(
                        "Rhyme bucket '{}' contains '{}' which does not end with it",
                        bucket.ending, word
                    )
                })
            })
            .collect();
        Ok(warnings)
    }
}
