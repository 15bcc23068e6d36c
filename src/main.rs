use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use grid_snake::app::App;
use grid_snake::config::{GameConfig, DEFAULT_HIGH_SCORE_FILE, FRAME_INTERVAL, THEME_CLASSIC};
use grid_snake::game::GameState;
use grid_snake::input::poll_inputs;
use grid_snake::renderer;
use grid_snake::score::HighScore;
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// File holding the highscore as a plain integer.
    #[arg(long = "high-score-file", default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// JSON file with gameplay settings (grid size, speed, reward).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file; filter with RUST_LOG.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig::load(cli.config.as_deref()).unwrap_or_else(|error| {
        eprintln!("Warning: {error}; using default settings");
        GameConfig::default()
    });
    let high_score = HighScore::load(cli.high_score_file);
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };

    info!(
        width = state.bounds().width,
        height = state.bounds().height,
        high_score = high_score.best(),
        seed = ?cli.seed,
        "starting game"
    );

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    run(&mut session, App::new(state, high_score))
}

fn run(session: &mut TerminalSession, mut app: App) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        for input in poll_inputs(FRAME_INTERVAL)? {
            if app.handle_input(input).is_break() {
                return Ok(());
            }
        }

        let now = Instant::now();
        app.advance(now.duration_since(last_frame));
        last_frame = now;

        let hud_info = app.hud_info(&THEME_CLASSIC);
        session.draw(|frame| renderer::render(frame, &app.state, &hud_info))?;
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
