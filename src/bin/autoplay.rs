//! Play games headlessly and print what happens.
//!
//! Every roll a person would make is made automatically, so this doubles as
//! a smoke test for board generation and the turn machine.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use snakes_ladders::board::FeatureMap;
use snakes_ladders::core::{GameConfig, GameMode, PlayerId, PlayerMap, Square};
use snakes_ladders::engine::{Presenter, Session};

/// Upper bound on rolls per game before giving up.
const MAX_ROLLS: usize = 10_000;

/// Clock time allowed for one roll to play out.
const TURN_LIMIT_MS: u64 = 60_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Player 1 against the computer
    Computer,
    /// Two people sharing the device
    Human,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Computer => GameMode::VsComputer,
            Mode::Human => GameMode::VsHuman,
        }
    }
}

/// Autoplay Snakes and Ladders games.
#[derive(Parser)]
#[command(name = "autoplay", about = "Play Snakes and Ladders games headlessly")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for boards and dice (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Who plays player 2
    #[arg(long, value_enum, default_value = "computer")]
    mode: Mode,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Only print the summary
    #[arg(long)]
    quiet: bool,
}

/// Presenter that narrates to stdout.
struct TextPresenter {
    verbose: bool,
}

impl Presenter for TextPresenter {
    fn render_board(&mut self, features: &FeatureMap) {
        if !self.verbose {
            return;
        }
        for feature in features.iter() {
            println!("  {:<6} {:>2} -> {:>2}", feature.kind, feature.start, feature.end);
        }
    }

    fn place_token(&mut self, player: PlayerId, square: Square) {
        if self.verbose {
            println!("    {player} on {square}");
        }
    }

    fn show_status(&mut self, text: &str) {
        if self.verbose && !text.is_empty() {
            println!("{text}");
        }
    }

    fn show_outcome(&mut self, title: &str, message: &str) {
        if self.verbose {
            println!("{title} {message}");
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let mode = GameMode::from(cli.mode);
    let presenter = TextPresenter { verbose: !cli.quiet };
    let mut session = Session::new(config, presenter).context("invalid configuration")?;

    let mut wins = PlayerMap::with_value(0usize);
    let mut total_rolls = 0;
    for game in 1..=cli.games {
        if !cli.quiet {
            println!("=== Game {game} ({mode}) ===");
        }
        session.start_game(mode);

        let mut rolls = 0;
        while session.state().winner().is_none() {
            if rolls == MAX_ROLLS {
                warn!(game, rolls, "no winner, abandoning game");
                break;
            }
            if session.roll_dice() {
                rolls += 1;
            }
            if !session.run_until_idle(TURN_LIMIT_MS) {
                bail!("turn did not settle within {TURN_LIMIT_MS}ms");
            }
        }

        if let Some(winner) = session.state().winner() {
            wins[winner] += 1;
            session.acknowledge_outcome();
        }
        total_rolls += rolls;
        info!(game, rolls, moves = session.state().history().len(), "game finished");
    }

    println!(
        "{} game(s): {} won {}, {} won {}, {:.1} rolls per game",
        cli.games,
        PlayerId::ONE,
        wins[PlayerId::ONE],
        PlayerId::TWO,
        wins[PlayerId::TWO],
        total_rolls as f64 / cli.games as f64,
    );
    Ok(())
}
