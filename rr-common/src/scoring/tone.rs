//! Tone matching between a chosen word and its lyric line
//!
//! The context's tone is the first category whose words occur anywhere in the
//! lower-cased context (substring match, so "hammer" also matches
//! "hammered"). When no category word occurs, the keyword fallbacks are tried
//! in order before settling on `"neutral"`. A word's tone is an exact lookup.
//!
//! Same tone scores 1.0, a compatible pair 0.7, anything else 0.3.

use crate::lexicon::{ToneLexicon, NEUTRAL_TONE};
use tracing::trace;

const SAME_TONE_SCORE: f64 = 1.0;
const COMPATIBLE_TONE_SCORE: f64 = 0.7;
const MISMATCHED_TONE_SCORE: f64 = 0.3;

/// Tone matcher over a fixed tone lexicon
#[derive(Debug, Clone, Default)]
pub struct ToneMatcher {
    lexicon: ToneLexicon,
}

impl ToneMatcher {
    pub fn new(lexicon: ToneLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &ToneLexicon {
        &self.lexicon
    }

    /// Score how well `chosen_word` matches the tone of `lyric_context`
    pub fn score(&self, chosen_word: &str, lyric_context: &str) -> f64 {
        if chosen_word.is_empty() || lyric_context.is_empty() {
            return 0.0;
        }

        let context_tone = self.context_tone(lyric_context);
        let word_tone = self.word_tone(chosen_word);

        let score = if context_tone == word_tone {
            SAME_TONE_SCORE
        } else if self.lexicon.are_compatible(context_tone, word_tone) {
            COMPATIBLE_TONE_SCORE
        } else {
            MISMATCHED_TONE_SCORE
        };

        trace!(chosen_word, context_tone, word_tone, score, "Tone score");
        score
    }

    /// Tone category of a lyric line
    pub fn context_tone(&self, context: &str) -> &str {
        let context = context.to_lowercase();

        let category = self
            .lexicon
            .categories
            .iter()
            .find(|c| c.words.iter().any(|w| context.contains(w.as_str())));
        if let Some(category) = category {
            return &category.name;
        }

        self.lexicon
            .fallbacks
            .iter()
            .find(|f| f.cues.iter().any(|cue| context.contains(cue.as_str())))
            .map(|f| f.tone.as_str())
            .unwrap_or(NEUTRAL_TONE)
    }

    /// Tone category of a single word
    pub fn word_tone(&self, word: &str) -> &str {
        let word = word.to_lowercase();
        self.lexicon
            .categories
            .iter()
            .find(|c| c.words.iter().any(|w| *w == word))
            .map(|c| c.name.as_str())
            .unwrap_or(NEUTRAL_TONE)
    }
}
