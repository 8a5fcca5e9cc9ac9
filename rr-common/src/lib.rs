//! # Rhyme Racer Common Library
//!
//! Scoring engine shared by the Rhyme Racer game services:
//! - Rhyme, beat and tone scorers
//! - Weighted overall score and performance feedback
//! - Session metrics aggregation
//! - Lexicon data (rhyme buckets, tone categories) and its TOML loading
//! - Configuration resolution

pub mod config;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod scoring;

pub use error::{Error, Result};
pub use lexicon::Lexicon;
pub use metrics::{finalize_session, ChoiceRecord, SessionMetrics};
pub use scoring::{
    feedback_for, BeatScorer, FeedbackColor, FeedbackResult, GameScorer, RhymeScorer,
    ScoreVector, TimingFeedback, ToneMatcher,
};
