//! Scoring engine
//!
//! Every scorer is pure: identical inputs give identical outputs, and a
//! scorer holds only read-only lexicon data, so one instance can be shared
//! across threads behind an `Arc`.

pub mod beat;
pub mod game;
pub mod rhyme;
pub mod tone;

pub use beat::{BeatScorer, TimingFeedback};
pub use game::{feedback_for, FeedbackResult, GameScorer, ScoreVector};
pub use rhyme::RhymeScorer;
pub use tone::ToneMatcher;

use serde::{Deserialize, Serialize};

/// Color tag attached to feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackColor {
    Green,
    Blue,
    Yellow,
    Red,
}

impl FeedbackColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackColor::Green => "green",
            FeedbackColor::Blue => "blue",
            FeedbackColor::Yellow => "yellow",
            FeedbackColor::Red => "red",
        }
    }
}

impl std::fmt::Display for FeedbackColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
