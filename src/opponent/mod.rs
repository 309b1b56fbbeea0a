//! Computer opponent
//!
//! Reroll strategies for the computer side.

pub mod strategy;
pub mod tiered;

pub use strategy::{
    CoinFlipStrategy, ComputerStrategy, FixedTierStrategy, ScoreContext, StrategyType,
    computer_player_strategy,
};
pub use tiered::{Tier, TieredStrategy};
