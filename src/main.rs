//! Dice Duel - CLI
//!
//! Five-dice game against a computer opponent with TUI and CLI modes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dice_duel::{
    commands::{SimulationConfig, advise_hand, run_simple, run_simulation},
    config::{DEFAULT_TARGET_SCORE, GameConfig, parse_target},
    logging,
    opponent::StrategyType,
    output::{print_advice_result, print_simulation_result},
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "dice_duel",
    about = "Five-dice scoring game against a tiered computer opponent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Score needed to win a match (at least 101)
    #[arg(
        short,
        long,
        global = true,
        default_value_t = DEFAULT_TARGET_SCORE,
        value_parser = target_arg
    )]
    target: u32,

    /// Computer strategy: tiered (default), conservative, balanced, aggressive, coin-flip
    #[arg(short, long, global = true, default_value = "tiered")]
    strategy: String,

    /// Seed the dice for a reproducible game
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based prompts without TUI)
    Simple,

    /// Show how the computer (as chosen by --strategy) would treat a hand
    Advise {
        /// Five dice values, e.g. `3 1 6 4 2`
        #[arg(num_args = 5, required = true)]
        dice: Vec<u8>,

        /// Computer's current score
        #[arg(short, long, default_value = "0")]
        computer: u32,

        /// Player's current score
        #[arg(short, long, default_value = "0")]
        player: u32,
    },

    /// Play many computer-vs-policy matches and report statistics
    Simulate {
        /// Number of matches to play
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,

        /// Policy standing in for the human player
        #[arg(short, long, default_value = "balanced")]
        player: String,
    },
}

fn target_arg(value: &str) -> Result<u32, String> {
    parse_target(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    // Log lines on stderr would tear the TUI, so it only logs to a file
    if !matches!(command, Commands::Play) || cli.log_file.is_some() {
        logging::init(cli.verbose, cli.log_file.as_deref())?;
    }

    let config = GameConfig::new(cli.target)
        .with_strategy(StrategyType::from_name(&cli.strategy))
        .with_seed(cli.seed);
    info!(
        target_score = config.target_score,
        strategy = %config.strategy.name(),
        "starting"
    );

    match command {
        Commands::Play => run_play_command(config),
        Commands::Simple => run_simple(config).map_err(|e| anyhow::anyhow!(e)),
        Commands::Advise {
            dice,
            computer,
            player,
        } => run_advise_command(&config, &dice, computer, player),
        Commands::Simulate { count, player } => {
            run_simulate_command(&config, count, &player);
            Ok(())
        }
    }
}

fn run_advise_command(config: &GameConfig, dice: &[u8], computer: u32, player: u32) -> Result<()> {
    let result = advise_hand(&config.strategy, dice, computer, player, config.target_score)
        .map_err(|e| anyhow::anyhow!(e))?;
    print_advice_result(&result);
    Ok(())
}

fn run_simulate_command(config: &GameConfig, count: usize, player: &str) {
    println!(
        "Simulating {count} matches to {} ({} vs {player})...",
        config.target_score,
        config.strategy.name()
    );

    let mut sim = SimulationConfig::new(count, config.target_score);
    sim.computer = config.strategy.clone();
    sim.player = StrategyType::from_name(player);
    sim.seed = config.seed;

    let result = run_simulation(&sim);
    print_simulation_result(&result);
}

fn run_play_command(config: GameConfig) -> Result<()> {
    use dice_duel::interactive::{App, run_tui};

    let app = App::new(config);
    run_tui(app)
}
