//! rr-game - Rhyme Racer scoring command-line tool
//!
//! Scores single choices, maps overall scores to feedback, and plays a
//! scripted demo session through the game service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rr_common::config::{default_config_path, load_lexicon, load_toml_config_or_default};
use rr_common::{feedback_for, GameScorer};
use rr_game::{Difficulty, GameService, InMemorySessionRepository, LyricCatalog, PlayerChoice};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "rr-game", version, about = "Rhyme Racer scoring engine")]
struct Cli {
    /// Lexicon TOML file (overrides RR_LEXICON and the config file)
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Lyric catalog TOML file used by `demo` (defaults to the built-in catalog)
    #[arg(long, global = true)]
    lyrics: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one word choice
    Score {
        #[arg(long)]
        word: String,
        /// Lyric line, with ___ marking the blank
        #[arg(long)]
        context: String,
        /// Tap time (ms)
        #[arg(long, allow_negative_numbers = true)]
        tap: f64,
        /// Beat time (ms)
        #[arg(long, allow_negative_numbers = true)]
        beat: f64,
    },
    /// Feedback for an overall score
    Feedback {
        #[arg(allow_negative_numbers = true)]
        overall: f64,
    },
    /// Play the lyric catalog once, answering each prompt with its correct rhyme
    Demo {
        #[arg(long, default_value = "demo")]
        player: String,
        #[arg(long, default_value = "medium")]
        difficulty: String,
        /// Tap offset from the beat (ms)
        #[arg(long, default_value_t = 120.0, allow_negative_numbers = true)]
        offset: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = default_config_path();
    let toml_config = load_toml_config_or_default(config_path.as_deref());

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| toml_config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting Rhyme Racer (rr-game) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let lexicon =
        load_lexicon(cli.lexicon.as_deref(), &toml_config).context("Failed to load lexicon")?;
    let scorer = Arc::new(GameScorer::new(lexicon));

    let output = match cli.command {
        Command::Score { word, context, tap, beat } => {
            let scores = scorer.score_choice(&word, &context, tap, beat);
            json!({
                "scores": scores,
                "feedback": feedback_for(scores.overall_score),
                "timing": scorer.beat_scorer().timing_feedback(scores.timing_offset),
            })
        }
        Command::Feedback { overall } => json!(feedback_for(overall)),
        Command::Demo { player, difficulty, offset } => {
            let difficulty: Difficulty = difficulty.parse()?;
            let catalog = match cli.lyrics.as_deref() {
                Some(path) => LyricCatalog::load(path)?,
                None => LyricCatalog::default(),
            };
            run_demo(scorer, catalog, &player, difficulty, offset).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_demo(
    scorer: Arc<GameScorer>,
    catalog: LyricCatalog,
    player: &str,
    difficulty: Difficulty,
    offset: f64,
) -> Result<serde_json::Value> {
    let rounds = catalog.len();
    let service = GameService::new(scorer, catalog, Arc::new(InMemorySessionRepository::new()));

    let started = service.start_game(player, difficulty).await?;
    let session_id = started.session_id;
    let mut prompt = started.prompt;
    let mut total_score = 0_i64;
    let mut rounds_played = Vec::with_capacity(rounds);

    for _ in 0..rounds {
        let beat_timestamp = prompt.beat_timing * 1000.0;
        let outcome = service
            .submit_choice(PlayerChoice {
                session_id,
                lyric_id: prompt.lyric_id.clone(),
                chosen_word: prompt.correct_rhyme.clone(),
                tap_timestamp: beat_timestamp + offset,
                beat_timestamp,
            })
            .await?;

        let round_score = outcome.metrics.overall_score * 1000.0 * outcome.speed_boost;
        total_score += round_score.round() as i64;
        rounds_played.push(json!({
            "lyric": prompt.lyric_text,
            "word": prompt.correct_rhyme,
            "scores": outcome.metrics,
            "feedback": outcome.feedback,
        }));
        prompt = outcome.next_prompt;
    }

    let game_over = service.end_game(session_id, total_score).await?;
    Ok(json!({
        "session_id": session_id,
        "rounds": rounds_played,
        "total_score": total_score,
        "game_over": game_over,
        "leaderboard": service.leaderboard(10).await,
    }))
}
