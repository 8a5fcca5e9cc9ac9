//! rr-game library interface
//!
//! Session layer for Rhyme Racer: lyric prompts, session storage, the game
//! service that feeds player choices into the scoring engine, and the
//! leaderboard of finished games.

pub mod error;
pub mod leaderboard;
pub mod lyrics;
pub mod service;
pub mod session;

pub use crate::error::{GameError, GameResult};
pub use crate::lyrics::{LyricCatalog, LyricEntry, LyricPrompt};
pub use crate::service::{ChoiceOutcome, GameOver, GameService, PlayerChoice, StartedGame};
pub use crate::session::{Difficulty, GameSession, InMemorySessionRepository, SessionRepository};
