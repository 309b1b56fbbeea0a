//! Game configuration and target-score validation

use crate::opponent::StrategyType;
use std::fmt;

/// Target score used when none is given
pub const DEFAULT_TARGET_SCORE: u32 = 101;

/// Smallest target a player may choose
pub const MIN_TARGET_SCORE: u32 = 101;

/// Settings for a game session
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub target_score: u32,
    pub strategy: StrategyType,
    /// Fixed seed for reproducible dice; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl GameConfig {
    #[must_use]
    pub fn new(target_score: u32) -> Self {
        Self {
            target_score,
            strategy: StrategyType::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyType) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_SCORE)
    }
}

/// Error type for target-score input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    NotANumber(String),
    BelowMinimum { value: u32, minimum: u32 },
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(input) => {
                write!(f, "Target score must be a whole number, got '{input}'")
            }
            Self::BelowMinimum { value, minimum } => {
                write!(f, "Target score must be at least {minimum}, got {value}")
            }
        }
    }
}

impl std::error::Error for TargetError {}

/// Parse a user-entered target score
///
/// # Errors
/// Returns `TargetError` if the input is not a non-negative integer or is below
/// [`MIN_TARGET_SCORE`].
///
/// # Examples
/// ```
/// use dice_duel::config::parse_target;
///
/// assert_eq!(parse_target(" 150 "), Ok(150));
/// assert!(parse_target("abc").is_err());
/// assert!(parse_target("50").is_err());
/// ```
pub fn parse_target(input: &str) -> Result<u32, TargetError> {
    let trimmed = input.trim();
    let value: u32 = trimmed
        .parse()
        .map_err(|_| TargetError::NotANumber(trimmed.to_string()))?;
    validate_target(value)
}

/// Check a numeric target against the minimum
///
/// # Errors
/// Returns `TargetError::BelowMinimum` if `value < MIN_TARGET_SCORE`.
pub const fn validate_target(value: u32) -> Result<u32, TargetError> {
    if value < MIN_TARGET_SCORE {
        Err(TargetError::BelowMinimum {
            value,
            minimum: MIN_TARGET_SCORE,
        })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_target_accepts_minimum_and_above() {
        assert_eq!(parse_target("101"), Ok(101));
        assert_eq!(parse_target("500"), Ok(500));
        assert_eq!(parse_target("  250\n"), Ok(250));
    }

    #[test]
    fn parse_target_rejects_non_numbers() {
        assert_eq!(
            parse_target("ten"),
            Err(TargetError::NotANumber("ten".to_string()))
        );
        assert!(parse_target("").is_err());
        assert!(parse_target("-5").is_err());
        assert!(parse_target("101.5").is_err());
    }

    #[test]
    fn parse_target_rejects_below_minimum() {
        assert_eq!(
            parse_target("100"),
            Err(TargetError::BelowMinimum {
                value: 100,
                minimum: 101
            })
        );
        assert_eq!(
            parse_target("50").unwrap_err().to_string(),
            "Target score must be at least 101, got 50"
        );
    }

    #[test]
    fn config_builders() {
        let config = GameConfig::new(150)
            .with_strategy(StrategyType::from_name("coin-flip"))
            .with_seed(Some(9));
        assert_eq!(config.target_score, 150);
        assert_eq!(config.strategy.name(), "coin-flip");
        assert_eq!(config.seed, Some(9));
        assert_eq!(GameConfig::default().target_score, DEFAULT_TARGET_SCORE);
    }
}
