//! Beat synchronization scoring
//!
//! Maps the offset between a player's tap and the beat to an accuracy score.
//!
//! | Offset (ms)     | Score                         | Feedback |
//! |-----------------|-------------------------------|----------|
//! | <= 100          | 1.0                           | green    |
//! | <= 250          | 0.8                           | blue     |
//! | <= 500          | 0.5                           | yellow   |
//! | > 500           | max(0, 1 - offset / 1000)     | red      |
//!
//! Thresholds come from [`BeatThresholds`] so they can be tuned per lexicon.

use super::FeedbackColor;
use crate::lexicon::BeatThresholds;
use serde::{Deserialize, Serialize};

const PERFECT_SCORE: f64 = 1.0;
const GOOD_SCORE: f64 = 0.8;
const ACCEPTABLE_SCORE: f64 = 0.5;

/// Message and color describing tap timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingFeedback {
    pub message: String,
    pub color: FeedbackColor,
}

/// Beat scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct BeatScorer {
    thresholds: BeatThresholds,
}

impl BeatScorer {
    pub fn new(thresholds: BeatThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &BeatThresholds {
        &self.thresholds
    }

    /// Absolute tap-to-beat distance in milliseconds
    pub fn timing_offset(tap_ts: f64, beat_ts: f64) -> f64 {
        (tap_ts - beat_ts).abs()
    }

    /// Accuracy of a tap at `tap_ts` against a beat at `beat_ts` (both ms)
    pub fn score(&self, tap_ts: f64, beat_ts: f64) -> f64 {
        self.score_offset(Self::timing_offset(tap_ts, beat_ts))
    }

    /// Accuracy for an already computed offset
    ///
    /// A NaN offset matches no band and floors to 0.0.
    pub fn score_offset(&self, offset: f64) -> f64 {
        let t = &self.thresholds;
        if offset <= t.perfect_ms {
            PERFECT_SCORE
        } else if offset <= t.good_ms {
            GOOD_SCORE
        } else if offset <= t.acceptable_ms {
            ACCEPTABLE_SCORE
        } else {
            // f64::max returns the non-NaN operand
            (1.0 - offset / t.decay_window_ms).max(0.0)
        }
    }

    /// Feedback for a timing offset, using the same bands as [`BeatScorer::score_offset`]
    pub fn timing_feedback(&self, offset: f64) -> TimingFeedback {
        let t = &self.thresholds;
        let (message, color) = if offset <= t.perfect_ms {
            ("Perfect timing! 🎯", FeedbackColor::Green)
        } else if offset <= t.good_ms {
            ("Good rhythm! 👍", FeedbackColor::Blue)
        } else if offset <= t.acceptable_ms {
            ("Almost on beat! ⚡", FeedbackColor::Yellow)
        } else {
            ("Missed the beat! 💥", FeedbackColor::Red)
        };
        TimingFeedback {
            message: message.to_string(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_beat_is_perfect() {
        let scorer = BeatScorer::default();
        assert_eq!(scorer.score(1000.0, 1000.0), 1.0);
        assert_eq!(scorer.score(1000.0, 1100.0), 1.0);
    }

    #[test]
    fn test_bands() {
        let scorer = BeatScorer::default();
        assert_eq!(scorer.score(1000.0, 1200.0), 0.8);
        assert_eq!(scorer.score(1250.0, 1000.0), 0.8);
        assert_eq!(scorer.score(1000.0, 1300.0), 0.5);
        assert_eq!(scorer.score(1000.0, 1500.0), 0.5);
    }

    #[test]
    fn test_linear_decay() {
        let scorer = BeatScorer::default();
        assert!((scorer.score_offset(750.0) - 0.25).abs() < 1e-12);
        assert_eq!(scorer.score_offset(1000.0), 0.0);
        assert_eq!(scorer.score(1000.0, 2500.0), 0.0);
    }

    #[test]
    fn test_nan_offset_floors_to_zero() {
        let scorer = BeatScorer::default();
        assert_eq!(scorer.score(f64::NAN, 1000.0), 0.0);
        assert_eq!(scorer.timing_feedback(f64::NAN).color, FeedbackColor::Red);
    }

    #[test]
    fn test_timing_feedback_colors() {
        let scorer = BeatScorer::default();
        assert_eq!(scorer.timing_feedback(0.0).color, FeedbackColor::Green);
        assert_eq!(scorer.timing_feedback(100.0).color, FeedbackColor::Green);
        assert_eq!(scorer.timing_feedback(101.0).color, FeedbackColor::Blue);
        assert_eq!(scorer.timing_feedback(500.0).color, FeedbackColor::Yellow);
        assert_eq!(scorer.timing_feedback(501.0).color, FeedbackColor::Red);
    }

    #[test]
    fn test_custom_thresholds() {
        let scorer = BeatScorer::new(BeatThresholds {
            perfect_ms: 20.0,
            good_ms: 40.0,
            acceptable_ms: 80.0,
            decay_window_ms: 200.0,
        });
        assert_eq!(scorer.score_offset(30.0), 0.8);
        assert!((scorer.score_offset(100.0) - 0.5).abs() < 1e-12);
    }
}
