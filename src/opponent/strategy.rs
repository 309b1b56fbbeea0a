//! Computer reroll strategies
//!
//! Defines the `ComputerStrategy` trait and the selectable implementations.

use super::tiered::{Tier, TieredStrategy, keep_mask_for_tier};
use crate::core::{DICE_PER_HAND, Hand, HeldMask};
use crate::engine::{MatchState, ROLLS_PER_ROUND, reroll};
use rand::Rng;

/// Scores a strategy decides against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreContext {
    pub computer_score: u32,
    pub player_score: u32,
    pub target_score: u32,
}

impl ScoreContext {
    #[must_use]
    pub const fn new(computer_score: u32, player_score: u32, target_score: u32) -> Self {
        Self {
            computer_score,
            player_score,
            target_score,
        }
    }

    #[must_use]
    pub const fn from_match(state: &MatchState) -> Self {
        Self::new(state.computer_score, state.player_score, state.target_score)
    }

    /// Points the computer still needs; negative once past target
    #[must_use]
    pub const fn computer_deficit(&self) -> i64 {
        self.target_score as i64 - self.computer_score as i64
    }

    /// Points the player still needs; negative once past target
    #[must_use]
    pub const fn player_deficit(&self) -> i64 {
        self.target_score as i64 - self.player_score as i64
    }
}

/// A strategy for deciding which of the computer's dice to keep
pub trait ComputerStrategy {
    /// Decide which dice survive the next reroll
    fn choose_keep<R: Rng + ?Sized>(
        &self,
        hand: &Hand,
        context: &ScoreContext,
        rng: &mut R,
    ) -> HeldMask;

    /// One decision followed by one reroll
    fn play_roll<R: Rng + ?Sized>(
        &self,
        hand: &Hand,
        context: &ScoreContext,
        rng: &mut R,
    ) -> Hand {
        let keep = self.choose_keep(hand, context, rng);
        reroll(hand, keep, rng)
    }

    /// A full computer turn: one decision and reroll per roll in the round
    fn play_turn<R: Rng + ?Sized>(
        &self,
        hand: &Hand,
        context: &ScoreContext,
        rng: &mut R,
    ) -> Hand {
        (0..ROLLS_PER_ROUND).fold(*hand, |current, _| self.play_roll(&current, context, rng))
    }
}

/// Reroll the computer's hand once using the default tiered strategy
///
/// ```
/// use dice_duel::core::Hand;
/// use dice_duel::opponent::computer_player_strategy;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let hand = Hand::from_values(&[6, 6, 6, 5, 5]).unwrap();
/// // High faces are never rerolled
/// assert_eq!(computer_player_strategy(&hand, 0, 0, 101, &mut rng), hand);
/// ```
pub fn computer_player_strategy<R: Rng + ?Sized>(
    hand: &Hand,
    computer_score: u32,
    player_score: u32,
    target_score: u32,
    rng: &mut R,
) -> Hand {
    let context = ScoreContext::new(computer_score, player_score, target_score);
    TieredStrategy::default().play_roll(hand, &context, rng)
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyType {
    /// Tier chosen from score deficits (default)
    Tiered(TieredStrategy),
    /// Always plays one tier
    Fixed(FixedTierStrategy),
    /// Rerolls each die on a coin flip
    CoinFlip(CoinFlipStrategy),
}

impl ComputerStrategy for StrategyType {
    fn choose_keep<R: Rng + ?Sized>(
        &self,
        hand: &Hand,
        context: &ScoreContext,
        rng: &mut R,
    ) -> HeldMask {
        match self {
            Self::Tiered(s) => s.choose_keep(hand, context, rng),
            Self::Fixed(s) => s.choose_keep(hand, context, rng),
            Self::CoinFlip(s) => s.choose_keep(hand, context, rng),
        }
    }
}

impl Default for StrategyType {
    fn default() -> Self {
        Self::Tiered(TieredStrategy::default())
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "tiered", "conservative", "balanced", "aggressive", "coin-flip"
    /// Defaults to tiered if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "coin-flip" | "coinflip" => Self::CoinFlip(CoinFlipStrategy::default()),
            other => Tier::from_name(other).map_or_else(Self::default, |tier| {
                Self::Fixed(FixedTierStrategy::new(tier))
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Tiered(_) => "tiered".to_string(),
            Self::Fixed(s) => s.tier.name().to_string(),
            Self::CoinFlip(_) => "coin-flip".to_string(),
        }
    }

    /// Tier this strategy would play at, if it plays tiers at all
    #[must_use]
    pub const fn tier(&self, context: &ScoreContext) -> Option<Tier> {
        match self {
            Self::Tiered(s) => Some(s.get_tier(context)),
            Self::Fixed(s) => Some(s.tier),
            Self::CoinFlip(_) => None,
        }
    }

    /// Chance of each die of `hand` being rerolled on the next decision
    #[must_use]
    pub fn reroll_probabilities(
        &self,
        hand: &Hand,
        context: &ScoreContext,
    ) -> [f64; DICE_PER_HAND] {
        match self {
            Self::Tiered(s) => s.reroll_probabilities(hand, context),
            Self::Fixed(s) => hand.values().map(|face| s.tier.reroll_probability(face)),
            Self::CoinFlip(s) => [s.reroll_chance; DICE_PER_HAND],
        }
    }
}

/// Plays one tier regardless of scores
///
/// Acts as a difficulty override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTierStrategy {
    pub tier: Tier,
}

impl FixedTierStrategy {
    #[must_use]
    pub const fn new(tier: Tier) -> Self {
        Self { tier }
    }
}

impl ComputerStrategy for FixedTierStrategy {
    fn choose_keep<R: Rng + ?Sized>(
        &self,
        hand: &Hand,
        _context: &ScoreContext,
        rng: &mut R,
    ) -> HeldMask {
        keep_mask_for_tier(self.tier, hand, rng)
    }
}

/// Coin-flip strategy
///
/// Rerolls every die independently with a fixed probability, ignoring faces and
/// scores. Kept apart from the tiered strategy on purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinFlipStrategy {
    pub reroll_chance: f64,
}

impl Default for CoinFlipStrategy {
    fn default() -> Self {
        Self { reroll_chance: 0.5 }
    }
}

impl ComputerStrategy for CoinFlipStrategy {
    fn choose_keep<R: Rng + ?Sized>(
        &self,
        hand: &Hand,
        _context: &ScoreContext,
        rng: &mut R,
    ) -> HeldMask {
        let mut keep = HeldMask::ALL;
        for index in 0..hand.dice().len() {
            if rng.random_bool(self.reroll_chance) {
                keep.set(index, false);
            }
        }
        keep
    }
}
