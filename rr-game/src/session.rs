//! Game sessions and their storage
//!
//! The service layer talks to sessions only through [`SessionRepository`],
//! so the in-memory store can be swapped for a persistent or distributed one
//! without touching scoring.
//!
//! [`InMemorySessionRepository`] keeps one mutex per session: appends to the
//! same session are serialized (no lost updates on double submits) while
//! different sessions never contend. A deleted session is marked closed under
//! its lock, so an append still queued on it fails instead of landing in a
//! state nobody will read.

use crate::error::{GameError, GameResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rr_common::ChoiceRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Difficulty requested at game start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GameError::InvalidInput(format!("Unknown difficulty: {}", other))),
        }
    }
}

/// State of one player's game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub session_id: Uuid,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub started_at: DateTime<Utc>,
    /// Append-only, in submission order
    choices: Vec<ChoiceRecord>,
}

impl GameSession {
    pub fn new(player_name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            player_name: player_name.into(),
            difficulty,
            started_at: Utc::now(),
            choices: Vec::new(),
        }
    }

    pub fn choices(&self) -> &[ChoiceRecord] {
        &self.choices
    }

    pub fn push_choice(&mut self, choice: ChoiceRecord) {
        self.choices.push(choice);
    }
}

/// Session storage used by the game service
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Snapshot of a session
    async fn get(&self, session_id: Uuid) -> Option<GameSession>;

    /// Whether a session exists, without copying it
    async fn contains(&self, session_id: Uuid) -> bool;

    /// Insert or replace a session
    async fn put(&self, session: GameSession);

    /// Remove a session, returning its final state
    async fn delete(&self, session_id: Uuid) -> Option<GameSession>;

    /// Append a choice to a session's history
    ///
    /// Returns the history length after the append.
    async fn append_choice(&self, session_id: Uuid, choice: ChoiceRecord) -> GameResult<usize>;
}

struct SessionEntry {
    session: GameSession,
    /// Set by `delete`; later appends are refused
    closed: bool,
}

type SessionHandle = Arc<Mutex<SessionEntry>>;

/// Process-local session store
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn handle(&self, session_id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    async fn append_to(
        handle: &SessionHandle,
        session_id: Uuid,
        choice: ChoiceRecord,
    ) -> GameResult<usize> {
        let mut entry = handle.lock().await;
        if entry.closed {
            debug!(%session_id, "Append after session closed");
            return Err(GameError::SessionNotFound(session_id));
        }
        entry.session.push_choice(choice);
        let count = entry.session.choices.len();
        debug!(%session_id, choices = count, "Appended choice");
        Ok(count)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, session_id: Uuid) -> Option<GameSession> {
        let handle = self.handle(session_id).await?;
        let entry = handle.lock().await;
        Some(entry.session.clone())
    }

    async fn contains(&self, session_id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&session_id)
    }

    async fn put(&self, session: GameSession) {
        let session_id = session.session_id;
        self.sessions
            .write()
            .await
            .insert(session_id, Arc::new(Mutex::new(SessionEntry { session, closed: false })));
    }

    async fn delete(&self, session_id: Uuid) -> Option<GameSession> {
        let handle = self.sessions.write().await.remove(&session_id)?;
        // Appends already holding the handle either finish first or see `closed`
        let mut entry = handle.lock().await;
        entry.closed = true;
        Some(entry.session.clone())
    }

    async fn append_choice(&self, session_id: Uuid, choice: ChoiceRecord) -> GameResult<usize> {
        let handle = self
            .handle(session_id)
            .await
            .ok_or(GameError::SessionNotFound(session_id))?;
        Self::append_to(&handle, session_id, choice).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_common::GameScorer;

    fn choice(scorer: &GameScorer, word: &str) -> ChoiceRecord {
        let context = "I'm moving fast like a flash of ___";
        ChoiceRecord::score(scorer, "lyric_0", word, context, 1000.0, 1000.0)
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("insane".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let repo = InMemorySessionRepository::new();
        let session = GameSession::new("ada", Difficulty::Medium);
        let id = session.session_id;

        repo.put(session).await;
        assert_eq!(repo.get(id).await.map(|s| s.player_name), Some("ada".to_string()));

        assert!(repo.contains(id).await);
        let removed = repo.delete(id).await;
        assert!(removed.is_some());
        assert!(repo.get(id).await.is_none());
        assert!(!repo.contains(id).await);
        assert!(repo.delete(id).await.is_none());
    }

    #[tokio::test]
    async fn test_append_choice_to_unknown_session() {
        let repo = InMemorySessionRepository::new();
        let scorer = GameScorer::default();
        let id = Uuid::new_v4();
        let result = repo.append_choice(id, choice(&scorer, "dash")).await;
        assert!(matches!(result, Err(GameError::SessionNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let repo = InMemorySessionRepository::new();
        let scorer = GameScorer::default();
        let session = GameSession::new("ada", Difficulty::Easy);
        let id = session.session_id;
        repo.put(session).await;

        assert_eq!(repo.append_choice(id, choice(&scorer, "dash")).await.unwrap(), 1);
        assert_eq!(repo.append_choice(id, choice(&scorer, "cash")).await.unwrap(), 2);

        let words: Vec<String> = repo
            .get(id)
            .await
            .unwrap()
            .choices()
            .iter()
            .map(|c| c.chosen_word().to_string())
            .collect();
        assert_eq!(words, vec!["dash", "cash"]);
    }

    #[tokio::test]
    async fn test_append_queued_behind_delete_is_refused() {
        let repo = InMemorySessionRepository::new();
        let scorer = GameScorer::default();
        let session = GameSession::new("ada", Difficulty::Medium);
        let id = session.session_id;
        repo.put(session).await;
        repo.append_choice(id, choice(&scorer, "dash")).await.unwrap();

        // Handle taken before the delete, as a racing submit would hold it
        let stale = repo.handle(id).await.unwrap();
        let removed = repo.delete(id).await.unwrap();
        assert_eq!(removed.choices().len(), 1);

        let late = InMemorySessionRepository::append_to(&stale, id, choice(&scorer, "cash")).await;
        assert!(matches!(late, Err(GameError::SessionNotFound(missing)) if missing == id));
        assert_eq!(stale.lock().await.session.choices().len(), 1);
    }
}
