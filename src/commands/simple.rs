//! Simple interactive CLI mode
//!
//! Text-based game loop without TUI

use crate::config::{GameConfig, parse_target};
use crate::engine::{Action, Event, Game, RoundSummary, Winner};
use crate::output::formatters::{hand_to_faces, hand_with_holds};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Roll,
    /// Zero-based die positions to toggle
    Hold(Vec<usize>),
    Score,
    New,
    Help,
    Quit,
}

/// Parse one line of input
///
/// Hold positions are entered 1-5 and returned 0-4.
///
/// # Errors
///
/// Returns a user-facing message for unknown commands or bad die numbers.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let mut parts = input.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("Type a command ('help' for the list)".to_string());
    };

    match head.to_lowercase().as_str() {
        "r" | "roll" => Ok(Command::Roll),
        "s" | "score" => Ok(Command::Score),
        "n" | "new" => Ok(Command::New),
        "?" | "help" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "h" | "hold" => {
            let positions = parts
                .flat_map(|p| p.split(','))
                .filter(|p| !p.is_empty())
                .map(|p| match p.parse::<usize>() {
                    Ok(n @ 1..=5) => Ok(n - 1),
                    _ => Err(format!("Dice are numbered 1-5, got '{p}'")),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if positions.is_empty() {
                return Err("Say which dice to hold, e.g. 'hold 1 3'".to_string());
            }
            Ok(Command::Hold(positions))
        }
        other => Err(format!("Unknown command '{other}' ('help' for the list)")),
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple(config: GameConfig) -> Result<(), String> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Dice Duel - Interactive Mode                ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Roll five dice up to three times a round and race the computer");
    println!("to the target score. Each round scores the sum of your dice.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    let Some(target) = prompt_target(&mut reader, config.target_score)? else {
        println!("\n👋 Thanks for playing!\n");
        return Ok(());
    };
    let mut game = Game::new(GameConfig {
        target_score: target,
        ..config
    });

    print_help();
    print_round_header(&game);

    loop {
        let Some(input) = get_user_input(&mut reader, "Command")? else {
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        };
        let command = match parse_command(&input) {
            Ok(command) => command,
            Err(message) => {
                println!("❌ {message}\n");
                continue;
            }
        };

        let actions: Vec<Action> = match command {
            Command::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            Command::Help => {
                print_help();
                continue;
            }
            Command::Roll => vec![Action::Roll],
            Command::Score => vec![Action::ScoreNow],
            Command::New => vec![Action::NewMatch],
            Command::Hold(positions) => positions.into_iter().map(Action::ToggleHold).collect(),
        };

        for action in actions {
            match game.apply(action) {
                Ok(Event::Rolled {
                    hand,
                    rolls_remaining,
                }) => {
                    println!(
                        "🎲 {}   ({rolls_remaining} roll{} left)\n",
                        hand_to_faces(&hand),
                        if rolls_remaining == 1 { "" } else { "s" }
                    );
                    print_hand(&game);
                }
                Ok(Event::HoldToggled { index, held }) => {
                    println!(
                        "Die {} {}",
                        index + 1,
                        if held { "held" } else { "released" }
                    );
                }
                Ok(Event::RoundScored(summary)) => {
                    print_round_summary(&summary, game.match_state().target_score);
                    if summary.result.is_some() {
                        print_tallies(&game);
                        if !ask_play_again(&mut reader)? {
                            println!("\n👋 Thanks for playing!\n");
                            return Ok(());
                        }
                        game.apply(Action::NewMatch).map_err(|e| e.to_string())?;
                    } else {
                        game.apply(Action::NextRound).map_err(|e| e.to_string())?;
                    }
                    print_round_header(&game);
                }
                Ok(Event::MatchStarted) => {
                    println!("\n🔄 New match started!\n");
                    print_round_header(&game);
                }
                Ok(Event::RoundStarted { .. }) => print_round_header(&game),
                Err(err) => println!("❌ {err}\n"),
            }
        }
        println!();
    }
}

/// Ask for the target score until a valid one is entered
///
/// An empty line takes `default`; `None` means input ended.
fn prompt_target<R: BufRead>(reader: &mut R, default: u32) -> Result<Option<u32>, String> {
    loop {
        let Some(input) = get_user_input(reader, &format!("Target score [{default}]"))? else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(Some(default));
        }
        match parse_target(&input) {
            Ok(target) => return Ok(Some(target)),
            Err(err) => println!("❌ {err}\n"),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  roll | r            reroll every die you are not holding");
    println!("  hold | h <1-5...>   toggle holds, e.g. 'hold 1 4'");
    println!("  score | s           score your dice now");
    println!("  new | n             abandon this match and start over");
    println!("  quit | q            leave\n");
}

fn print_round_header(game: &Game) {
    let state = game.match_state();
    println!("────────────────────────────────────────────────────────────");
    println!(
        "Round {}   You {} - {} Computer   (target {})",
        game.round_number(),
        state.player_score.to_string().bright_cyan().bold(),
        state.computer_score.to_string().bright_magenta().bold(),
        state.target_score
    );
    println!("────────────────────────────────────────────────────────────");
    print_hand(game);
}

fn print_hand(game: &Game) {
    let round = game.round();
    println!(
        "  Your dice:  {}   (sum {}, {} roll{} left)",
        hand_with_holds(round.player_hand(), round.held()),
        round.player_hand().sum(),
        round.rolls_remaining(),
        if round.rolls_remaining() == 1 { "" } else { "s" }
    );
}

/// Print the outcome of a scored round
pub fn print_round_summary(summary: &RoundSummary, target: u32) {
    println!(
        "\n  You:      {}  +{}",
        hand_to_faces(&summary.player_hand),
        summary.delta.player.to_string().bright_cyan()
    );
    println!(
        "  Computer: {}  +{}",
        hand_to_faces(&summary.computer_hand),
        summary.delta.computer.to_string().bright_magenta()
    );
    println!(
        "  Totals:   You {} - {} Computer  (target {target})",
        summary.player_total, summary.computer_total
    );

    let Some(result) = &summary.result else {
        return;
    };

    if let Some(tb) = &result.tie_break {
        println!(
            "\n  ⚖️  Dead heat! Tie-breaker after {} throw{}: you {} vs computer {}",
            tb.attempts,
            if tb.attempts == 1 { "" } else { "s" },
            tb.player_hand.sum(),
            tb.computer_hand.sum()
        );
    }

    println!("\n{}", "═".repeat(60).bright_cyan());
    match result.winner {
        Winner::Player => println!("{}", "    🎉  Y O U   W I N !  🎉".bright_green().bold()),
        Winner::Computer => println!("{}", "    🤖  Computer wins this one.".bright_red().bold()),
    }
    println!("{}", "═".repeat(60).bright_cyan());
}

fn print_tallies(game: &Game) {
    let state = game.match_state();
    println!(
        "\n  Matches won: you {}, computer {}\n",
        state.player_wins.to_string().bright_green(),
        state.computer_wins.to_string().bright_red()
    );
}

fn ask_play_again<R: BufRead>(reader: &mut R) -> Result<bool, String> {
    let answer = get_user_input(reader, "Play again? (yes/no)")?.unwrap_or_default();
    Ok(matches!(answer.to_lowercase().as_str(), "yes" | "y"))
}

/// Get user input with a prompt
///
/// Returns `None` once the input is exhausted.
fn get_user_input<R: BufRead>(reader: &mut R, prompt: &str) -> Result<Option<String>, String> {
    print!("{prompt}: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(|e| e.to_string())?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}
