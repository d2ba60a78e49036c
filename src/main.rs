use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade::app::App;
use snake_arcade::audio::{AudioManager, DEFAULT_AUDIO_DIR};
use snake_arcade::game::{Difficulty, GameConfig};
use snake_arcade::logger::init_logger;
use snake_arcade::log;
use snake_arcade::scores::{DEFAULT_SCORE_FILE, ScoreStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Classic Snake in the terminal, with difficulty tiers and high scores")]
struct Cli {
    /// JSON file with game settings; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Difficulty highlighted in the menu (easy, medium, hard or 1-3)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Name recorded on the leaderboard
    #[arg(long)]
    player: Option<String>,

    /// High score file
    #[arg(long, default_value = DEFAULT_SCORE_FILE)]
    scores: PathBuf,

    /// Directory holding the sound files
    #[arg(long, default_value = DEFAULT_AUDIO_DIR)]
    audio_dir: PathBuf,

    /// Start with sound turned off
    #[arg(long)]
    mute: bool,

    /// Log file
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match self.config {
            Some(ref path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(difficulty) = self.difficulty {
            config.starting_difficulty = difficulty;
        }
        if let Some(ref player) = self.player {
            config.player_name = player.clone();
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !init_logger(Some("snake".to_string()), &cli.log_file) {
        eprintln!("Could not open log file {:?}, logging disabled", cli.log_file);
    }

    let config = cli.game_config()?;
    log!(
        "Starting on a {}x{} grid as {:?}",
        config.grid_width,
        config.grid_height,
        config.player_name
    );

    let scores = ScoreStore::open(&cli.scores);
    let audio = AudioManager::new(&cli.audio_dir, !cli.mute);

    let mut app = App::new(config, scores, audio);
    app.run().await?;

    log!("Exiting");
    Ok(())
}
