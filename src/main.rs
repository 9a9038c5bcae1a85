use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use term_snake::game::{GameConfig, GameEngine};
use term_snake::logging;
use term_snake::modes::HumanMode;
use term_snake::record::{FileRecordStore, MemoryRecordStore, RecordStore, ScoreBoard};
use term_snake::render::Renderer;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal with a persisted high score")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field extent in pixels (capped at 400 and at what the terminal fits)
    #[arg(long)]
    field_size: Option<i32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<i32>,

    /// Initial tick period in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Where the best score is kept
    #[arg(long, default_value = "snake_record.json")]
    record_file: PathBuf,

    /// Keep the best score for this session only
    #[arg(long)]
    no_save: bool,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(field_size) = self.field_size {
            config.field_size = field_size;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.initial_speed_ms = speed;
        }
        config.validate()?;

        let (columns, rows) =
            crossterm::terminal::size().context("Failed to read the terminal size")?;
        let fitted = config.fit_viewport(Renderer::field_capacity(columns, rows))?;
        fitted.validate()?;
        Ok(fitted)
    }
}

async fn play<S: RecordStore>(engine: GameEngine, store: S) -> Result<()> {
    let scoreboard = ScoreBoard::open(store);
    let mut human_mode = HumanMode::new(engine, scoreboard);
    human_mode.run().await?;

    println!("Best score: {}", human_mode.scoreboard().record());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    tracing::info!(?config, "configuration loaded");

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    if cli.no_save {
        play(engine, MemoryRecordStore::new()).await
    } else {
        play(engine, FileRecordStore::new(cli.record_file)).await
    }
}
