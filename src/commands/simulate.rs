//! Simulation command
//!
//! Plays many full matches between the computer strategy and a scripted
//! player, driving the same `Game` sessions the interactive modes use.

use crate::config::GameConfig;
use crate::core::HeldMask;
use crate::engine::{Action, Event, Game, Winner};
use crate::opponent::{ComputerStrategy, ScoreContext, StrategyType};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Rounds after which a match is abandoned; unreachable with targets in range
const MAX_ROUNDS: u32 = 10_000;

/// Configuration for a simulation run
pub struct SimulationConfig {
    pub matches: usize,
    pub target_score: u32,
    pub computer: StrategyType,
    /// Policy standing in for the human player
    pub player: StrategyType,
    pub seed: Option<u64>,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(matches: usize, target_score: u32) -> Self {
        Self {
            matches,
            target_score,
            computer: StrategyType::default(),
            player: StrategyType::from_name("balanced"),
            seed: None,
        }
    }
}

/// Result of one simulated match
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub winner: Winner,
    pub rounds: u32,
    pub player_score: u32,
    pub computer_score: u32,
    pub tie_break: bool,
}

/// Aggregate statistics over all simulated matches
pub struct SimulationResult {
    pub matches: usize,
    pub player_wins: usize,
    pub computer_wins: usize,
    pub tie_breaks: usize,
    pub average_rounds: f64,
    pub min_rounds: u32,
    pub max_rounds: u32,
    pub average_margin: f64,
    pub rounds_distribution: FxHashMap<u32, usize>,
    pub duration: Duration,
    pub computer_strategy: String,
    pub player_strategy: String,
}

impl SimulationResult {
    #[must_use]
    pub fn computer_win_rate(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.computer_wins as f64 / self.matches as f64
        }
    }
}

/// Play one match to completion
///
/// The player's rolls follow `player`, judged from its own side of the scores;
/// it holds whatever the policy keeps and rolls until the budget is spent.
#[must_use]
pub fn play_match(
    target_score: u32,
    computer: &StrategyType,
    player: &StrategyType,
    seed: u64,
) -> Option<MatchOutcome> {
    let config = GameConfig::new(target_score)
        .with_strategy(computer.clone())
        .with_seed(Some(seed));
    let mut game = Game::new(config);
    let mut player_rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

    while game.round_number() <= MAX_ROUNDS {
        let state = game.match_state();
        let context = ScoreContext::new(state.player_score, state.computer_score, target_score);

        let summary = loop {
            let keep = player.choose_keep(game.round().player_hand(), &context, &mut player_rng);
            let action = if keep == HeldMask::ALL {
                Action::ScoreNow
            } else {
                align_holds(&mut game, keep)?;
                Action::Roll
            };
            if let Event::RoundScored(summary) = game.apply(action).ok()? {
                break summary;
            }
        };

        if let Some(result) = summary.result {
            return Some(MatchOutcome {
                winner: result.winner,
                rounds: summary.round,
                player_score: summary.player_total,
                computer_score: summary.computer_total,
                tie_break: result.tie_break.is_some(),
            });
        }
        game.apply(Action::NextRound).ok()?;
    }

    None
}

/// Toggle holds until the round's mask equals `keep`
fn align_holds(game: &mut Game, keep: HeldMask) -> Option<()> {
    let current = game.round().held();
    for index in 0..crate::core::DICE_PER_HAND {
        if current.is_held(index) != keep.is_held(index) {
            game.apply(Action::ToggleHold(index)).ok()?;
        }
    }
    Some(())
}

/// Run the simulation, in parallel, with a progress bar
///
/// # Panics
///
/// Panics if the progress bar template is invalid.
pub fn run_simulation(config: &SimulationConfig) -> SimulationResult {
    let start = Instant::now();
    let base_seed = config.seed.unwrap_or_else(rand::random);

    let pb = ProgressBar::new(config.matches as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    pb.set_message(format!(
        "{} vs {}",
        config.computer.name(),
        config.player.name()
    ));

    let outcomes: Vec<MatchOutcome> = (0..config.matches as u64)
        .into_par_iter()
        .filter_map(|i| {
            let outcome = play_match(
                config.target_score,
                &config.computer,
                &config.player,
                base_seed.wrapping_add(i),
            );
            pb.inc(1);
            outcome
        })
        .collect();

    pb.finish_with_message("Complete!");

    summarize(
        &outcomes,
        start.elapsed(),
        config.computer.name(),
        config.player.name(),
    )
}

fn summarize(
    outcomes: &[MatchOutcome],
    duration: Duration,
    computer_strategy: String,
    player_strategy: String,
) -> SimulationResult {
    let matches = outcomes.len();
    let computer_wins = outcomes
        .iter()
        .filter(|o| o.winner == Winner::Computer)
        .count();
    let tie_breaks = outcomes.iter().filter(|o| o.tie_break).count();

    let mut rounds_distribution: FxHashMap<u32, usize> = FxHashMap::default();
    for outcome in outcomes {
        *rounds_distribution.entry(outcome.rounds).or_insert(0) += 1;
    }

    let (average_rounds, average_margin) = if matches == 0 {
        (0.0, 0.0)
    } else {
        let total_rounds: u64 = outcomes.iter().map(|o| u64::from(o.rounds)).sum();
        let total_margin: u64 = outcomes
            .iter()
            .map(|o| u64::from(o.player_score.abs_diff(o.computer_score)))
            .sum();
        (
            total_rounds as f64 / matches as f64,
            total_margin as f64 / matches as f64,
        )
    };

    SimulationResult {
        matches,
        player_wins: matches - computer_wins,
        computer_wins,
        tie_breaks,
        average_rounds,
        min_rounds: outcomes.iter().map(|o| o.rounds).min().unwrap_or(0),
        max_rounds: outcomes.iter().map(|o| o.rounds).max().unwrap_or(0),
        average_margin,
        rounds_distribution,
        duration,
        computer_strategy,
        player_strategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_match_finishes() {
        let outcome = play_match(
            101,
            &StrategyType::default(),
            &StrategyType::from_name("balanced"),
            1,
        )
        .unwrap();

        assert!(outcome.rounds >= 4);
        assert!(outcome.player_score >= 101 || outcome.computer_score >= 101);
        if !outcome.tie_break {
            let expected = if outcome.player_score > outcome.computer_score {
                Winner::Player
            } else {
                Winner::Computer
            };
            assert_eq!(outcome.winner, expected);
        }
    }

    #[test]
    fn play_match_is_reproducible() {
        let computer = StrategyType::default();
        let player = StrategyType::from_name("coin-flip");
        let a = play_match(150, &computer, &player, 99).unwrap();
        let b = play_match(150, &computer, &player, 99).unwrap();
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.rounds, b.rounds);
        assert_eq!(a.player_score, b.player_score);
    }

    #[test]
    fn simulation_counts_add_up() {
        let mut config = SimulationConfig::new(40, 101);
        config.seed = Some(5);
        let result = run_simulation(&config);

        assert_eq!(result.matches, 40);
        assert_eq!(result.player_wins + result.computer_wins, 40);
        assert_eq!(result.rounds_distribution.values().sum::<usize>(), 40);
        assert!(result.min_rounds <= result.max_rounds);
        assert!(result.average_rounds >= f64::from(result.min_rounds));
        assert!(result.average_rounds <= f64::from(result.max_rounds));
    }

    #[test]
    fn summarize_empty() {
        let result = summarize(&[], Duration::ZERO, "a".into(), "b".into());
        assert_eq!(result.matches, 0);
        assert!(result.computer_win_rate().abs() < f64::EPSILON);
        assert_eq!(result.min_rounds, 0);
    }
}
