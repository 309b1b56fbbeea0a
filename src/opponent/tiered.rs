//! Tiered computer strategy
//!
//! Picks a risk tier from the score deficits, then rerolls each die with a
//! probability keyed to its face.

use super::strategy::{ComputerStrategy, ScoreContext};
use crate::core::{DICE_PER_HAND, Hand, HeldMask};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Tiered strategy with configurable tier thresholds
///
/// Thresholds use cascading comparisons on signed deficits
/// (`deficit = target - score`):
/// ```text
/// if own_deficit > player_deficit + aggressive_margin   → Aggressive
/// else if 1 <= own_deficit <= balanced_window           → Balanced
/// else                                                  → Conservative
/// ```
///
/// With default thresholds (30, 30):
/// - **Aggressive**: more than 30 points further from target than the player
/// - **Balanced**: within 30 points of target
/// - **Conservative**: everything else, including an early even match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredStrategy {
    /// Deficit gap to the player beyond which the computer chases (default: 30)
    pub aggressive_margin: i64,

    /// Own deficit at or below this plays balanced (default: 30)
    pub balanced_window: i64,
}

impl TieredStrategy {
    /// Create a tiered strategy with custom thresholds
    #[must_use]
    pub const fn new(aggressive_margin: i64, balanced_window: i64) -> Self {
        Self {
            aggressive_margin,
            balanced_window,
        }
    }

    /// Get the tier for the current scores
    #[must_use]
    pub const fn get_tier(&self, context: &ScoreContext) -> Tier {
        let score_deficit = context.computer_deficit();
        let player_deficit = context.player_deficit();

        if score_deficit > player_deficit + self.aggressive_margin {
            Tier::Aggressive
        } else if score_deficit >= 1 && score_deficit <= self.balanced_window {
            Tier::Balanced
        } else {
            Tier::Conservative
        }
    }

    /// Reroll probability for every die of `hand` under the current tier
    #[must_use]
    pub fn reroll_probabilities(
        &self,
        hand: &Hand,
        context: &ScoreContext,
    ) -> [f64; DICE_PER_HAND] {
        let tier = self.get_tier(context);
        hand.values().map(|face| tier.reroll_probability(face))
    }
}

impl Default for TieredStrategy {
    fn default() -> Self {
        Self::new(
            30, // aggressive_margin
            30, // balanced_window: deficits 1-30
        )
    }
}

/// Risk tier the computer plays at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Close to target or level: only dump ones and twos, and rarely
    Conservative,

    /// Within reach of target: reroll low faces fairly often
    Balanced,

    /// Well behind the player: reroll anything up to a four
    Aggressive,
}

impl Tier {
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];

    /// Chance of rerolling a die showing `face`
    ///
    /// Faces above a tier's cutoffs are never rerolled.
    #[must_use]
    pub const fn reroll_probability(self, face: u8) -> f64 {
        match self {
            Self::Aggressive => match face {
                0..=3 => 0.8,
                4 => 0.5,
                _ => 0.0,
            },
            Self::Balanced => match face {
                0..=2 => 0.6,
                3 => 0.4,
                _ => 0.0,
            },
            Self::Conservative => match face {
                0..=2 => 0.3,
                _ => 0.0,
            },
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Roll a keep decision for each die at the given tier
pub(crate) fn keep_mask_for_tier<R: Rng + ?Sized>(
    tier: Tier,
    hand: &Hand,
    rng: &mut R,
) -> HeldMask {
    let mut keep = HeldMask::ALL;
    for (index, face) in hand.values().into_iter().enumerate() {
        let p = tier.reroll_probability(face);
        if p > 0.0 && rng.random_bool(p) {
            keep.set(index, false);
        }
    }
    keep
}

impl ComputerStrategy for TieredStrategy {
    fn choose_keep<R: Rng + ?Sized>(
        &self,
        hand: &Hand,
        context: &ScoreContext,
        rng: &mut R,
    ) -> HeldMask {
        let tier = self.get_tier(context);
        let keep = keep_mask_for_tier(tier, hand, rng);

        debug!(%tier, %hand, rerolling = ?keep.free_indices(), "computer decision");
        keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ctx(computer: u32, player: u32) -> ScoreContext {
        ScoreContext::new(computer, player, 101)
    }

    #[test]
    fn tiers_correct() {
        let strategy = TieredStrategy::default();

        // Level and far from target
        assert_eq!(strategy.get_tier(&ctx(0, 0)), Tier::Conservative);
        // 31 points further away than the player
        assert_eq!(strategy.get_tier(&ctx(0, 31)), Tier::Aggressive);
        // Exactly 30 behind is not aggressive
        assert_eq!(strategy.get_tier(&ctx(0, 30)), Tier::Conservative);
        // Within 30 of target
        assert_eq!(strategy.get_tier(&ctx(71, 60)), Tier::Balanced);
        assert_eq!(strategy.get_tier(&ctx(100, 90)), Tier::Balanced);
        // 31 from target
        assert_eq!(strategy.get_tier(&ctx(70, 60)), Tier::Conservative);
        // At or past target
        assert_eq!(strategy.get_tier(&ctx(101, 90)), Tier::Conservative);
        assert_eq!(strategy.get_tier(&ctx(120, 90)), Tier::Conservative);
    }

    #[test]
    fn aggressive_wins_over_balanced() {
        let strategy = TieredStrategy::default();
        // Own deficit 20 is in the balanced window, but the player is past target
        assert_eq!(strategy.get_tier(&ctx(81, 120)), Tier::Aggressive);
    }

    #[test]
    fn custom_thresholds() {
        let strategy = TieredStrategy::new(10, 50);
        assert_eq!(strategy.get_tier(&ctx(0, 11)), Tier::Aggressive);
        assert_eq!(strategy.get_tier(&ctx(51, 40)), Tier::Balanced);
        assert_eq!(strategy.get_tier(&ctx(50, 45)), Tier::Conservative);
    }

    #[test]
    fn probability_table() {
        assert!((Tier::Aggressive.reroll_probability(1) - 0.8).abs() < f64::EPSILON);
        assert!((Tier::Aggressive.reroll_probability(3) - 0.8).abs() < f64::EPSILON);
        assert!((Tier::Aggressive.reroll_probability(4) - 0.5).abs() < f64::EPSILON);
        assert!(Tier::Aggressive.reroll_probability(5) == 0.0);

        assert!((Tier::Balanced.reroll_probability(2) - 0.6).abs() < f64::EPSILON);
        assert!((Tier::Balanced.reroll_probability(3) - 0.4).abs() < f64::EPSILON);
        assert!(Tier::Balanced.reroll_probability(4) == 0.0);

        assert!((Tier::Conservative.reroll_probability(1) - 0.3).abs() < f64::EPSILON);
        assert!(Tier::Conservative.reroll_probability(3) == 0.0);
        assert!(Tier::Conservative.reroll_probability(6) == 0.0);
    }

    #[test]
    fn high_faces_never_rerolled() {
        let mut rng = StdRng::seed_from_u64(8);
        let hand = Hand::from_values(&[5, 6, 5, 6, 6]).unwrap();
        for tier in Tier::ALL {
            for _ in 0..100 {
                assert_eq!(keep_mask_for_tier(tier, &hand, &mut rng), HeldMask::ALL);
            }
        }
    }

    #[test]
    fn aggressive_rerolls_low_faces_often() {
        let mut rng = StdRng::seed_from_u64(99);
        let hand = Hand::from_values(&[1, 1, 1, 1, 1]).unwrap();
        let rerolled: u32 = (0..1_000)
            .map(|_| 5 - keep_mask_for_tier(Tier::Aggressive, &hand, &mut rng).count())
            .sum();
        // Expect about 4000 of 5000
        assert!((3_700..=4_300).contains(&rerolled), "rerolled {rerolled}");
    }

    #[test]
    fn reroll_probabilities_follow_tier() {
        let strategy = TieredStrategy::default();
        let hand = Hand::from_values(&[1, 3, 4, 5, 6]).unwrap();
        let probs = strategy.reroll_probabilities(&hand, &ctx(0, 40));
        assert_eq!(probs, [0.8, 0.8, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn tier_names_round_trip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_name(tier.name()), Some(tier));
        }
        assert_eq!(Tier::from_name("reckless"), None);
    }
}
