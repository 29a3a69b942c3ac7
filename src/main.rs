//! Headless guideline Tetris runner (default binary).
//!
//! Plays a game with the built-in placement policy and prints the final snapshot as JSON.
//! There is no rendering; pipe the output into whatever wants to draw it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use guideline_tetris::autoplay::Autoplayer;
use guideline_tetris::core::{EngineConfig, GameState};
use guideline_tetris::types::{LockDelayMode, GRID_WIDTH};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum LockMode {
    Infinity,
    MoveReset,
    StepReset,
}

impl From<LockMode> for LockDelayMode {
    fn from(value: LockMode) -> Self {
        match value {
            LockMode::Infinity => LockDelayMode::Infinity,
            LockMode::MoveReset => LockDelayMode::MoveReset,
            LockMode::StepReset => LockDelayMode::StepReset,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "guideline-demo", about = "Headless autoplay for the guideline Tetris engine")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = WARN, -vv = INFO, -vvv = DEBUG, -vvvv = TRACE)")]
    verbose: u8,

    #[arg(long, help = "Path to a JSON engine config")]
    config: Option<PathBuf>,

    #[arg(long, help = "Randomizer seed (overrides the config file)")]
    seed: Option<u32>,

    #[arg(long, value_enum, help = "Lock delay mode (overrides the config file)")]
    lock_mode: Option<LockMode>,

    #[arg(long, help = "Starting level (overrides the config file)")]
    start_level: Option<u32>,

    #[arg(long, default_value = "100", help = "Number of pieces to place")]
    pieces: u32,

    #[arg(long, default_value = "16", help = "Milliseconds fed to the engine per input")]
    frame_ms: u32,

    #[arg(long, help = "Also print the visible field as text")]
    board: bool,

    #[arg(long, help = "Pretty-print the JSON snapshot")]
    pretty: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(mode) = cli.lock_mode {
        config.lock_delay_mode = mode.into();
    }
    if let Some(level) = cli.start_level {
        config.start_level = level;
    }
    Ok(config)
}

fn render_board(game: &GameState) -> String {
    let snapshot = game.snapshot();
    let mut rows: Vec<[u8; GRID_WIDTH as usize]> = snapshot.visible_rows().to_vec();
    let top = snapshot.grid.len() - rows.len();
    if let Some(active) = snapshot.active {
        for (x, y) in active.cells {
            let Some(row) = (y as usize).checked_sub(top).and_then(|y| rows.get_mut(y)) else {
                continue;
            };
            row[x as usize] = active.kind.code();
        }
    }

    let mut out = String::new();
    for row in rows {
        out.push('|');
        for code in row {
            out.push(if code == 0 { '.' } else { '#' });
        }
        out.push_str("|\n");
    }
    out.push_str(&format!("+{}+", "-".repeat(GRID_WIDTH as usize)));
    out
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let mut game = GameState::with_config(config).context("invalid engine config")?;
    game.start_game();
    info!(seed = game.seed(), pieces = cli.pieces, "autoplay starting");

    let player = Autoplayer::new(cli.frame_ms);
    let placed = player.run(&mut game, cli.pieces);
    info!(
        placed,
        score = game.score(),
        lines = game.lines(),
        level = game.level(),
        "autoplay finished"
    );

    if cli.board {
        println!("{}", render_board(&game));
    }

    let snapshot = game.snapshot();
    let json = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}
