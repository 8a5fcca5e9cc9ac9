//! Combined game scoring
//!
//! Runs the rhyme, beat and tone scorers for one player choice and folds
//! them into a weighted overall score:
//!
//! `overall = 0.4 * rhyme + 0.4 * beat + 0.2 * tone`
//!
//! The weights sum to 1, so the overall score stays in [0, 1] whenever the
//! sub-scores do.
//!
//! # Feedback bands
//! - overall > 0.9: green, 1.5x speed boost
//! - overall > 0.7: blue, 1.2x
//! - overall > 0.5: yellow, 1.0x
//! - otherwise: red, 0.5x
//!
//! Band edges are strict, so 0.9, 0.7 and 0.5 fall into the lower band.

use super::{BeatScorer, FeedbackColor, RhymeScorer, ToneMatcher};
use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use tracing::debug;

const RHYME_WEIGHT: f64 = 0.4;
const BEAT_WEIGHT: f64 = 0.4;
const TONE_WEIGHT: f64 = 0.2;

/// Per-choice scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub rhyme_accuracy: f64,
    pub beat_accuracy: f64,
    pub tone_score: f64,
    /// Absolute tap-to-beat distance (ms)
    pub timing_offset: f64,
    pub overall_score: f64,
}

/// Qualitative feedback for an overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResult {
    pub message: String,
    pub color: FeedbackColor,
    pub speed_boost: f64,
}

/// Map an overall score to its feedback band
///
/// Total over all inputs: anything not above 0.5 (including NaN) is red.
pub fn feedback_for(overall_score: f64) -> FeedbackResult {
    let (message, color, speed_boost) = if overall_score > 0.9 {
        ("🔥 Perfect! Amazing flow!", FeedbackColor::Green, 1.5)
    } else if overall_score > 0.7 {
        ("👍 Great rhythm! Keep it up!", FeedbackColor::Blue, 1.2)
    } else if overall_score > 0.5 {
        ("⚠️ Good effort! Almost there!", FeedbackColor::Yellow, 1.0)
    } else {
        ("💥 Missed the mark! Try again!", FeedbackColor::Red, 0.5)
    };

    FeedbackResult {
        message: message.to_string(),
        color,
        speed_boost,
    }
}

/// Scorer combining rhyme, beat and tone
#[derive(Debug, Clone, Default)]
pub struct GameScorer {
    rhyme: RhymeScorer,
    beat: BeatScorer,
    tone: ToneMatcher,
}

impl GameScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            rhyme: RhymeScorer::new(lexicon.rhyme),
            beat: BeatScorer::new(lexicon.beat),
            tone: ToneMatcher::new(lexicon.tone),
        }
    }

    pub fn rhyme_scorer(&self) -> &RhymeScorer {
        &self.rhyme
    }

    pub fn beat_scorer(&self) -> &BeatScorer {
        &self.beat
    }

    pub fn tone_matcher(&self) -> &ToneMatcher {
        &self.tone
    }

    /// Score one player choice
    ///
    /// # Arguments
    /// * `chosen_word` - Word the player picked
    /// * `lyric_context` - Lyric line containing the blank
    /// * `tap_ts` - Tap time (ms)
    /// * `beat_ts` - Beat time on the same clock (ms)
    pub fn comprehensive_score(
        &self,
        chosen_word: &str,
        lyric_context: &str,
        tap_ts: f64,
        beat_ts: f64,
    ) -> ScoreVector {
        let rhyme_accuracy = self.rhyme.score(chosen_word, lyric_context);
        let beat_accuracy = self.beat.score(tap_ts, beat_ts);
        let tone_score = self.tone.score(chosen_word, lyric_context);
        let timing_offset = BeatScorer::timing_offset(tap_ts, beat_ts);

        let overall_score =
            RHYME_WEIGHT * rhyme_accuracy + BEAT_WEIGHT * beat_accuracy + TONE_WEIGHT * tone_score;

        debug!(
            chosen_word,
            rhyme_accuracy,
            beat_accuracy,
            tone_score,
            timing_offset,
            overall_score,
            "Scored choice"
        );

        ScoreVector {
            rhyme_accuracy,
            beat_accuracy,
            tone_score,
            timing_offset,
            overall_score,
        }
    }

    /// Alias of [`GameScorer::comprehensive_score`] named for callers of the engine
    pub fn score_choice(
        &self,
        chosen_word: &str,
        lyric_context: &str,
        tap_ts: f64,
        beat_ts: f64,
    ) -> ScoreVector {
        self.comprehensive_score(chosen_word, lyric_context, tap_ts, beat_ts)
    }

    /// Feedback band for an overall score
    pub fn performance_feedback(&self, overall_score: f64) -> FeedbackResult {
        feedback_for(overall_score)
    }
}
