//! Game session service
//!
//! Request-level operations over the scoring engine: start a game, submit a
//! timed choice, end a game. The service owns no global state; its session
//! repository is injected.

use crate::error::{GameError, GameResult};
use crate::leaderboard::{Leaderboard, PlayerScore};
use crate::lyrics::{LyricCatalog, LyricPrompt};
use crate::session::{Difficulty, GameSession, SessionRepository};
use chrono::Utc;
use rr_common::{
    finalize_session, ChoiceRecord, FeedbackResult, GameScorer, ScoreVector, SessionMetrics,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Response to a game start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartedGame {
    pub session_id: Uuid,
    pub prompt: LyricPrompt,
}

/// A player's timed word choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerChoice {
    pub session_id: Uuid,
    pub lyric_id: String,
    pub chosen_word: String,
    /// Tap time (ms)
    pub tap_timestamp: f64,
    /// Beat time on the same clock (ms)
    pub beat_timestamp: f64,
}

/// Scores and feedback for one choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    pub feedback: FeedbackResult,
    pub metrics: ScoreVector,
    pub speed_boost: f64,
    pub next_prompt: LyricPrompt,
}

/// Final result of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOver {
    pub final_metrics: SessionMetrics,
    pub message: String,
}

/// Game service over an injected session repository
pub struct GameService<R: SessionRepository> {
    scorer: Arc<GameScorer>,
    catalog: LyricCatalog,
    sessions: Arc<R>,
    leaderboard: Leaderboard,
}

impl<R: SessionRepository> GameService<R> {
    pub fn new(scorer: Arc<GameScorer>, catalog: LyricCatalog, sessions: Arc<R>) -> Self {
        Self {
            scorer,
            catalog,
            sessions,
            leaderboard: Leaderboard::new(),
        }
    }

    pub fn scorer(&self) -> &GameScorer {
        &self.scorer
    }

    pub fn sessions(&self) -> &R {
        &self.sessions
    }

    /// Start a session and serve its first prompt
    pub async fn start_game(
        &self,
        player_name: &str,
        difficulty: Difficulty,
    ) -> GameResult<StartedGame> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(GameError::InvalidInput("Player name must not be empty".to_string()));
        }

        let session = GameSession::new(player_name, difficulty);
        let session_id = session.session_id;
        self.sessions.put(session).await;

        info!(%session_id, player = player_name, difficulty = difficulty.as_str(), "Game started");

        Ok(StartedGame {
            session_id,
            prompt: self.catalog.prompt(0),
        })
    }

    /// Score a choice, record it and serve the next prompt
    ///
    /// The choice is scored against the lyric named by `lyric_id`. An unknown
    /// id scores against an empty context, which degrades rhyme and tone to
    /// 0.0 rather than failing the request.
    pub async fn submit_choice(&self, choice: PlayerChoice) -> GameResult<ChoiceOutcome> {
        if !self.sessions.contains(choice.session_id).await {
            return Err(GameError::SessionNotFound(choice.session_id));
        }

        let lyric_context = match self.catalog.find(&choice.lyric_id) {
            Some(entry) => entry.lyric_text.clone(),
            None => {
                warn!(
                    session_id = %choice.session_id,
                    lyric_id = %choice.lyric_id,
                    "Unknown lyric id, scoring without context"
                );
                String::new()
            }
        };

        let record = ChoiceRecord::score(
            &self.scorer,
            choice.lyric_id,
            choice.chosen_word,
            lyric_context,
            choice.tap_timestamp,
            choice.beat_timestamp,
        );
        let metrics = *record.scores();
        let feedback = self.scorer.performance_feedback(metrics.overall_score);

        let answered = self.sessions.append_choice(choice.session_id, record).await?;

        Ok(ChoiceOutcome {
            speed_boost: feedback.speed_boost,
            feedback,
            metrics,
            next_prompt: self.catalog.prompt(answered),
        })
    }

    /// Finalize a session, record it on the leaderboard and drop it
    pub async fn end_game(&self, session_id: Uuid, total_score: i64) -> GameResult<GameOver> {
        let session = self
            .sessions
            .delete(session_id)
            .await
            .ok_or(GameError::SessionNotFound(session_id))?;

        let final_metrics = finalize_session(session.choices());
        info!(
            %session_id,
            player = %session.player_name,
            total_score,
            choices = final_metrics.choice_count,
            "Game ended"
        );

        self.leaderboard
            .record(PlayerScore {
                session_id,
                player_name: session.player_name,
                total_score,
                metrics: final_metrics,
                created_at: Utc::now(),
            })
            .await;

        Ok(GameOver {
            final_metrics,
            message: "Game completed successfully!".to_string(),
        })
    }

    /// Best finished games
    pub async fn leaderboard(&self, limit: usize) -> Vec<PlayerScore> {
        self.leaderboard.top(limit).await
    }
}
