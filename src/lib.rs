//! Dice Duel
//!
//! A five-dice scoring game: you and a computer opponent race to a target score,
//! rolling up to three times per round and holding the dice you like.
//!
//! # Quick Start
//!
//! ```rust
//! use dice_duel::config::GameConfig;
//! use dice_duel::engine::{Action, Event, Game};
//!
//! let mut game = Game::new(GameConfig::default().with_seed(Some(7)));
//!
//! // Hold the first die, roll the rest, then bank the round
//! game.apply(Action::ToggleHold(0)).unwrap();
//! game.apply(Action::Roll).unwrap();
//! let Event::RoundScored(summary) = game.apply(Action::ScoreNow).unwrap() else {
//!     panic!("expected a scored round");
//! };
//! assert_eq!(summary.delta.player, summary.player_hand.sum());
//! ```

// Core domain types
pub mod core;

// Round engine and game session
pub mod engine;

// Computer opponent
pub mod opponent;

// Game configuration
pub mod config;

// Tracing setup
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
