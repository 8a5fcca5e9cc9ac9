//! Rhyme accuracy scoring
//!
//! Scores how well a chosen word rhymes with the rhyme target of a lyric line
//! and how well it fits the line's mood.
//!
//! # Scoring Algorithm
//! - **Phonetic similarity** (weight: 0.7):
//!   - Exact match: 1.0
//!   - Both words in the same rhyme bucket: 0.9
//!   - One word in a bucket, both ending with the bucket's ending: 0.8
//!   - Otherwise the Ratcliff/Obershelp match ratio `2 * M / T` (M matched
//!     characters, T total characters), +0.2 when the last two characters
//!     agree (capped at 1.0)
//! - **Contextual fit** (weight: 0.3):
//!   - Positive cue in context and chosen word is a positive cue: 0.9
//!   - Negative cue in context and chosen word is a negative cue: 0.9
//!   - Otherwise: 0.5
//!
//! Bucket matching is a spelling heuristic, not a rhyme detector: short words
//! can hit the shared-ending branch without sounding alike.

use crate::lexicon::RhymeLexicon;
use difflib::sequencematcher::SequenceMatcher;
use tracing::trace;

/// Placeholder token marking the blank in a lyric line
pub const BLANK_TOKEN: &str = "___";

const PHONETIC_WEIGHT: f64 = 0.7;
const CONTEXTUAL_WEIGHT: f64 = 0.3;
const SAME_BUCKET_SCORE: f64 = 0.9;
const SHARED_ENDING_SCORE: f64 = 0.8;
const ENDING_BONUS: f64 = 0.2;
const CUE_MATCH_SCORE: f64 = 0.9;
const NEUTRAL_FIT_SCORE: f64 = 0.5;

/// Rhyme scorer over a fixed rhyme lexicon
#[derive(Debug, Clone, Default)]
pub struct RhymeScorer {
    lexicon: RhymeLexicon,
}

impl RhymeScorer {
    pub fn new(lexicon: RhymeLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &RhymeLexicon {
        &self.lexicon
    }

    /// Score `chosen_word` against `lyric_context`
    ///
    /// Returns 0.0 for an empty word or context, or a context with fewer
    /// than two tokens.
    pub fn score(&self, chosen_word: &str, lyric_context: &str) -> f64 {
        if chosen_word.is_empty() || lyric_context.is_empty() {
            return 0.0;
        }

        let Some(target) = rhyme_target(lyric_context) else {
            return 0.0;
        };

        let phonetic = self.phonetic_similarity(chosen_word, target);
        let contextual = self.contextual_fit(chosen_word, lyric_context);
        let score =
            (PHONETIC_WEIGHT * phonetic + CONTEXTUAL_WEIGHT * contextual).clamp(0.0, 1.0);

        trace!(
            chosen_word,
            target,
            phonetic,
            contextual,
            score,
            "Rhyme score"
        );
        score
    }

    /// Phonetic similarity of two words in [0, 1]
    pub fn phonetic_similarity(&self, word1: &str, word2: &str) -> f64 {
        let a = word1.trim().to_lowercase();
        let b = word2.trim().to_lowercase();

        if a == b {
            return 1.0;
        }

        for bucket in &self.lexicon.buckets {
            let has_a = bucket.contains(&a);
            let has_b = bucket.contains(&b);
            if has_a && has_b {
                return SAME_BUCKET_SCORE;
            }
            let shared_ending =
                a.ends_with(bucket.ending.as_str()) && b.ends_with(bucket.ending.as_str());
            if (has_a || has_b) && shared_ending {
                return SHARED_ENDING_SCORE;
            }
        }

        let mut similarity = match_ratio(&a, &b);
        if last_two_chars(&a) == last_two_chars(&b) {
            similarity += ENDING_BONUS;
        }
        similarity.min(1.0)
    }

    /// Mood fit of the chosen word within the context
    pub fn contextual_fit(&self, word: &str, context: &str) -> f64 {
        let word = word.to_lowercase();
        let context = context.to_lowercase();

        for cues in [&self.lexicon.positive_cues, &self.lexicon.negative_cues] {
            let context_has_cue = cues.iter().any(|cue| context.contains(cue.as_str()));
            if context_has_cue && cues.iter().any(|cue| *cue == word) {
                return CUE_MATCH_SCORE;
            }
        }
        NEUTRAL_FIT_SCORE
    }
}

/// Word the blank should rhyme with
///
/// The last token, or the one before it when the last token is the blank.
/// `None` when the context has fewer than two tokens.
pub fn rhyme_target(lyric_context: &str) -> Option<&str> {
    let tokens: Vec<&str> = lyric_context.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    let last = tokens[tokens.len() - 1];
    if last == BLANK_TOKEN {
        Some(tokens[tokens.len() - 2])
    } else {
        Some(last)
    }
}

/// Ratcliff/Obershelp similarity over characters, in [0, 1]
fn match_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut matcher = SequenceMatcher::new(&a, &b);
    f64::from(matcher.ratio())
}

/// Last two characters, or the whole word when shorter
fn last_two_chars(word: &str) -> &str {
    match word.char_indices().rev().nth(1) {
        Some((idx, _)) => &word[idx..],
        None => word,
    }
}
