//! Finished-game leaderboard

use chrono::{DateTime, Utc};
use rr_common::SessionMetrics;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Result of one finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub session_id: Uuid,
    pub player_name: String,
    pub total_score: i64,
    pub metrics: SessionMetrics,
    pub created_at: DateTime<Utc>,
}

/// In-process leaderboard
#[derive(Debug, Default)]
pub struct Leaderboard {
    entries: RwLock<Vec<PlayerScore>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, score: PlayerScore) {
        self.entries.write().await.push(score);
    }

    /// Best `limit` scores, highest total first; ties keep recording order
    pub async fn top(&self, limit: usize) -> Vec<PlayerScore> {
        let mut entries = self.entries.read().await.clone();
        // stable sort keeps earlier entries ahead on ties
        entries.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        entries.truncate(limit);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, total: i64) -> PlayerScore {
        PlayerScore {
            session_id: Uuid::new_v4(),
            player_name: name.to_string(),
            total_score: total,
            metrics: SessionMetrics::default(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_top_orders_by_total_then_insertion() {
        let board = Leaderboard::new();
        board.record(score("a", 100)).await;
        board.record(score("b", 300)).await;
        board.record(score("c", 300)).await;
        board.record(score("d", 200)).await;

        let names: Vec<String> = board.top(3).await.into_iter().map(|s| s.player_name).collect();
        assert_eq!(names, vec!["b", "c", "d"]);
        assert!(board.top(0).await.is_empty());
    }
}
