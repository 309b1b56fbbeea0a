//! Round engine
//!
//! Rerolls, scoring and the per-round roll budget.
//!
//! ```text
//! AwaitingRoll(3) → AwaitingRoll(2) → AwaitingRoll(1) → Scored
//!        └────────────────┴──── score now ────────────────┘
//! ```
//!
//! Rolling with one roll left is the final roll; the caller scores the round
//! straight after it.

use crate::core::{DICE_PER_HAND, Die, Hand, HeldMask};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Rolls a player gets per round
pub const ROLLS_PER_ROUND: u8 = 3;

/// Replace every unheld die with a fresh uniform roll
///
/// Held dice pass through unchanged. This function knows nothing about the roll
/// budget; [`RoundState::roll`] is the guarded entry point.
pub fn reroll<R: Rng + ?Sized>(hand: &Hand, held: HeldMask, rng: &mut R) -> Hand {
    let mut next = *hand;
    for index in 0..DICE_PER_HAND {
        if !held.is_held(index) {
            next.set(index, Die::roll(rng));
        }
    }
    next
}

/// Score of a hand: the plain sum of its faces
#[inline]
#[must_use]
pub fn score(hand: &Hand) -> u32 {
    hand.sum()
}

/// Where a round currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    AwaitingRoll { rolls_remaining: u8 },
    Scored,
}

/// Error type for round transitions the caller should have guarded against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    NoRollsRemaining,
    InvalidDieIndex(usize),
    AlreadyScored,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRollsRemaining => write!(f, "No rolls left this round"),
            Self::InvalidDieIndex(index) => {
                write!(f, "Die index must be 0-{}, got {index}", DICE_PER_HAND - 1)
            }
            Self::AlreadyScored => write!(f, "This round has already been scored"),
        }
    }
}

impl std::error::Error for RoundError {}

/// Dice and roll budget for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    rolls_remaining: u8,
    player_hand: Hand,
    computer_hand: Hand,
    held: HeldMask,
    scored: bool,
}

impl RoundState {
    /// Start a round with fresh, unheld hands for both sides
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_hands(Hand::roll(rng), Hand::roll(rng))
    }

    /// Start a round from known hands
    #[must_use]
    pub const fn with_hands(player_hand: Hand, computer_hand: Hand) -> Self {
        Self {
            rolls_remaining: ROLLS_PER_ROUND,
            player_hand,
            computer_hand,
            held: HeldMask::NONE,
            scored: false,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        if self.scored {
            RoundPhase::Scored
        } else {
            RoundPhase::AwaitingRoll {
                rolls_remaining: self.rolls_remaining,
            }
        }
    }

    #[must_use]
    pub const fn rolls_remaining(&self) -> u8 {
        self.rolls_remaining
    }

    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    #[must_use]
    pub const fn computer_hand(&self) -> &Hand {
        &self.computer_hand
    }

    #[must_use]
    pub const fn held(&self) -> HeldMask {
        self.held
    }

    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.scored
    }

    /// Whether the player may still roll
    #[must_use]
    pub const fn can_roll(&self) -> bool {
        !self.scored && self.rolls_remaining > 0
    }

    /// Toggle the hold on one of the player's dice, returning the new hold state
    ///
    /// # Errors
    /// Returns `RoundError::InvalidDieIndex` for an index >= 5 and
    /// `RoundError::AlreadyScored` once the round is over.
    pub fn toggle_hold(&mut self, index: usize) -> Result<bool, RoundError> {
        if self.scored {
            return Err(RoundError::AlreadyScored);
        }
        self.held
            .toggle(index)
            .ok_or(RoundError::InvalidDieIndex(index))
    }

    /// Reroll the player's unheld dice and spend one roll
    ///
    /// Returns the rolls left afterwards; zero means this was the final roll.
    ///
    /// # Errors
    /// Returns `RoundError::NoRollsRemaining` when the budget is spent and
    /// `RoundError::AlreadyScored` once the round is over. State is untouched on error.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<u8, RoundError> {
        if self.scored {
            return Err(RoundError::AlreadyScored);
        }
        if self.rolls_remaining == 0 {
            return Err(RoundError::NoRollsRemaining);
        }

        self.player_hand = reroll(&self.player_hand, self.held, rng);
        self.rolls_remaining -= 1;

        debug!(
            hand = %self.player_hand,
            held = ?self.held.indices(),
            rolls_remaining = self.rolls_remaining,
            "player rolled"
        );

        Ok(self.rolls_remaining)
    }

    /// Close the round with the given final computer hand
    ///
    /// # Errors
    /// Returns `RoundError::AlreadyScored` if the round was already closed.
    pub fn close(&mut self, computer_hand: Hand) -> Result<(), RoundError> {
        if self.scored {
            return Err(RoundError::AlreadyScored);
        }
        self.computer_hand = computer_hand;
        self.scored = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hand(values: [u8; 5]) -> Hand {
        Hand::from_values(&values).unwrap()
    }

    #[test]
    fn score_is_sum() {
        assert_eq!(score(&hand([1, 1, 1, 1, 1])), 5);
        assert_eq!(score(&hand([6, 6, 6, 6, 6])), 30);
        assert_eq!(score(&hand([3, 4, 2, 1, 5])), 15);
    }

    #[test]
    fn reroll_keeps_held_dice() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = hand([1, 2, 3, 4, 5]);
        let held = HeldMask::from_indices(&[0, 2, 4]);

        for _ in 0..200 {
            let next = reroll(&start, held, &mut rng);
            assert_eq!(next.values()[0], 1);
            assert_eq!(next.values()[2], 3);
            assert_eq!(next.values()[4], 5);
        }
    }

    #[test]
    fn reroll_all_held_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = hand([6, 5, 4, 3, 2]);
        assert_eq!(reroll(&start, HeldMask::ALL, &mut rng), start);
    }

    #[test]
    fn reroll_nothing_held_changes_something_eventually() {
        let mut rng = StdRng::seed_from_u64(5);
        let start = hand([1, 1, 1, 1, 1]);
        let changed = (0..20).any(|_| reroll(&start, HeldMask::NONE, &mut rng) != start);
        assert!(changed);
    }

    #[test]
    fn new_round_is_fresh() {
        let mut rng = StdRng::seed_from_u64(9);
        let round = RoundState::new(&mut rng);
        assert_eq!(round.rolls_remaining(), ROLLS_PER_ROUND);
        assert_eq!(round.held(), HeldMask::NONE);
        assert_eq!(
            round.phase(),
            RoundPhase::AwaitingRoll { rolls_remaining: 3 }
        );
    }

    #[test]
    fn roll_spends_budget_then_fails() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut round = RoundState::new(&mut rng);

        assert_eq!(round.roll(&mut rng), Ok(2));
        assert_eq!(round.roll(&mut rng), Ok(1));
        assert_eq!(round.roll(&mut rng), Ok(0));
        assert!(!round.can_roll());

        let before = round.clone();
        assert_eq!(round.roll(&mut rng), Err(RoundError::NoRollsRemaining));
        assert_eq!(round, before);
    }

    #[test]
    fn roll_respects_holds() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut round = RoundState::with_hands(hand([6, 6, 1, 1, 1]), hand([2, 2, 2, 2, 2]));
        round.toggle_hold(0).unwrap();
        round.toggle_hold(1).unwrap();

        round.roll(&mut rng).unwrap();
        round.roll(&mut rng).unwrap();

        assert_eq!(round.player_hand().values()[..2], [6, 6]);
        assert_eq!(round.computer_hand().values(), [2, 2, 2, 2, 2]);
    }

    #[test]
    fn toggle_hold_rejects_bad_index() {
        let mut round = RoundState::with_hands(hand([1; 5]), hand([1; 5]));
        assert_eq!(round.toggle_hold(5), Err(RoundError::InvalidDieIndex(5)));
        assert_eq!(round.toggle_hold(4), Ok(true));
        assert_eq!(round.toggle_hold(4), Ok(false));
    }

    #[test]
    fn close_marks_scored() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut round = RoundState::with_hands(hand([1; 5]), hand([1; 5]));
        round.close(hand([6; 5])).unwrap();

        assert_eq!(round.phase(), RoundPhase::Scored);
        assert_eq!(round.computer_hand().sum(), 30);
        assert_eq!(round.roll(&mut rng), Err(RoundError::AlreadyScored));
        assert_eq!(round.toggle_hold(0), Err(RoundError::AlreadyScored));
        assert_eq!(round.close(hand([1; 5])), Err(RoundError::AlreadyScored));
    }
}
