//! Strategy advice command
//!
//! Shows how the computer would treat a given hand at given scores.

use crate::core::{DICE_PER_HAND, Hand};
use crate::opponent::{ScoreContext, StrategyType, Tier};

/// Result of asking for advice on a hand
pub struct AdviceResult {
    pub hand: Hand,
    /// Name of the computer strategy consulted
    pub strategy: String,
    /// Tier played, `None` for strategies that ignore tiers
    pub tier: Option<Tier>,
    pub context: ScoreContext,
    pub reroll_probabilities: [f64; DICE_PER_HAND],
    /// Expected number of dice rerolled on the next roll
    pub expected_rerolls: f64,
    /// Expected hand sum after one reroll
    pub expected_sum: f64,
}

/// Mean face of a fresh die
const MEAN_FACE: f64 = 3.5;

/// Work out the computer's reroll odds for a hand
///
/// # Errors
///
/// Returns an error if the dice are not five values in 1..=6.
pub fn advise_hand(
    strategy: &StrategyType,
    values: &[u8],
    computer_score: u32,
    player_score: u32,
    target_score: u32,
) -> Result<AdviceResult, String> {
    let hand = Hand::from_values(values).map_err(|e| format!("Invalid hand: {e}"))?;
    let context = ScoreContext::new(computer_score, player_score, target_score);

    let tier = strategy.tier(&context);
    let reroll_probabilities = strategy.reroll_probabilities(&hand, &context);

    let expected_rerolls: f64 = reroll_probabilities.iter().sum();
    let expected_sum: f64 = hand
        .values()
        .iter()
        .zip(reroll_probabilities)
        .map(|(&face, p)| (1.0 - p).mul_add(f64::from(face), p * MEAN_FACE))
        .sum();

    Ok(AdviceResult {
        hand,
        strategy: strategy.name(),
        tier,
        context,
        reroll_probabilities,
        expected_rerolls,
        expected_sum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advise_far_behind_is_aggressive() {
        let result = advise_hand(&StrategyType::default(), &[1, 2, 3, 4, 5], 0, 60, 101).unwrap();
        assert_eq!(result.tier, Some(Tier::Aggressive));
        assert_eq!(result.reroll_probabilities, [0.8, 0.8, 0.8, 0.5, 0.0]);
        assert!((result.expected_rerolls - 2.9).abs() < 1e-9);
    }

    #[test]
    fn advise_high_hand_changes_nothing() {
        let result = advise_hand(&StrategyType::default(), &[6, 6, 5, 5, 6], 0, 0, 101).unwrap();
        assert_eq!(result.tier, Some(Tier::Conservative));
        assert!(result.expected_rerolls.abs() < f64::EPSILON);
        assert!((result.expected_sum - 28.0).abs() < 1e-9);
    }

    #[test]
    fn advise_expected_sum_improves_low_hand() {
        let result = advise_hand(&StrategyType::default(), &[1, 1, 1, 1, 1], 80, 80, 101).unwrap();
        assert_eq!(result.tier, Some(Tier::Balanced));
        // Each die: 0.4 * 1 + 0.6 * 3.5 = 2.5
        assert!((result.expected_sum - 12.5).abs() < 1e-9);
    }

    #[test]
    fn advise_rejects_bad_hand() {
        assert!(advise_hand(&StrategyType::default(), &[1, 2, 3], 0, 0, 101).is_err());
        assert!(advise_hand(&StrategyType::default(), &[1, 2, 3, 4, 7], 0, 0, 101).is_err());
    }

    #[test]
    fn advise_uses_selected_strategy() {
        // Level scores would make the tiered computer conservative
        let aggressive = StrategyType::from_name("aggressive");
        let result = advise_hand(&aggressive, &[1, 2, 3, 4, 5], 0, 0, 101).unwrap();
        assert_eq!(result.strategy, "aggressive");
        assert_eq!(result.tier, Some(Tier::Aggressive));
        assert_eq!(result.reroll_probabilities, [0.8, 0.8, 0.8, 0.5, 0.0]);

        let coin = StrategyType::from_name("coin-flip");
        let result = advise_hand(&coin, &[6, 6, 6, 6, 6], 0, 0, 101).unwrap();
        assert_eq!(result.tier, None);
        assert!((result.expected_rerolls - 2.5).abs() < 1e-9);
    }
}
