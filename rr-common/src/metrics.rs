//! Per-choice records and session-level metrics
//!
//! A [`ChoiceRecord`] is created once per submitted choice and never changes.
//! [`finalize_session`] reduces a session's history to plain averages; there
//! is no weighting or decay over the session.

use crate::scoring::{GameScorer, ScoreVector};
use serde::{Deserialize, Serialize};

/// One scored player decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    lyric_id: String,
    chosen_word: String,
    lyric_context: String,
    tap_timestamp: f64,
    beat_timestamp: f64,
    scores: ScoreVector,
}

impl ChoiceRecord {
    /// Score a choice and capture the result
    pub fn score(
        scorer: &GameScorer,
        lyric_id: impl Into<String>,
        chosen_word: impl Into<String>,
        lyric_context: impl Into<String>,
        tap_timestamp: f64,
        beat_timestamp: f64,
    ) -> Self {
        let chosen_word = chosen_word.into();
        let lyric_context = lyric_context.into();
        let scores =
            scorer.comprehensive_score(&chosen_word, &lyric_context, tap_timestamp, beat_timestamp);
        Self {
            lyric_id: lyric_id.into(),
            chosen_word,
            lyric_context,
            tap_timestamp,
            beat_timestamp,
            scores,
        }
    }

    pub fn lyric_id(&self) -> &str {
        &self.lyric_id
    }

    pub fn chosen_word(&self) -> &str {
        &self.chosen_word
    }

    pub fn lyric_context(&self) -> &str {
        &self.lyric_context
    }

    pub fn tap_timestamp(&self) -> f64 {
        self.tap_timestamp
    }

    pub fn beat_timestamp(&self) -> f64 {
        self.beat_timestamp
    }

    pub fn scores(&self) -> &ScoreVector {
        &self.scores
    }

    pub fn rhyme_accuracy(&self) -> f64 {
        self.scores.rhyme_accuracy
    }

    pub fn beat_accuracy(&self) -> f64 {
        self.scores.beat_accuracy
    }

    pub fn tone_score(&self) -> f64 {
        self.scores.tone_score
    }

    pub fn timing_offset(&self) -> f64 {
        self.scores.timing_offset
    }

    pub fn overall_score(&self) -> f64 {
        self.scores.overall_score
    }
}

/// Session averages
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub rhyme_accuracy_score: f64,
    pub beat_sync_accuracy: f64,
    pub tone_match_score: f64,
    /// Mean timing offset (ms)
    pub reaction_speed_avg: f64,
    pub choice_count: usize,
}

/// Average a session's choices
///
/// An empty history yields all-zero metrics.
pub fn finalize_session(choices: &[ChoiceRecord]) -> SessionMetrics {
    if choices.is_empty() {
        return SessionMetrics::default();
    }

    let n = choices.len() as f64;
    let mean = |field: fn(&ChoiceRecord) -> f64| choices.iter().map(field).sum::<f64>() / n;

    SessionMetrics {
        rhyme_accuracy_score: mean(ChoiceRecord::rhyme_accuracy),
        beat_sync_accuracy: mean(ChoiceRecord::beat_accuracy),
        tone_match_score: mean(ChoiceRecord::tone_score),
        reaction_speed_avg: mean(ChoiceRecord::timing_offset),
        choice_count: choices.len(),
    }
}
