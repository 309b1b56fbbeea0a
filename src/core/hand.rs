//! Five-dice hands and hold masks

use super::die::{Die, DieError};
use rand::Rng;
use std::fmt;

/// Number of dice in a hand
pub const DICE_PER_HAND: usize = 5;

/// Five dice belonging to one side for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand([Die; DICE_PER_HAND]);

/// Error type for hands built from raw values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    WrongLength(usize),
    InvalidDie { index: usize, source: DieError },
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(len) => {
                write!(f, "A hand needs exactly {DICE_PER_HAND} dice, got {len}")
            }
            Self::InvalidDie { index, source } => write!(f, "Die {}: {source}", index + 1),
        }
    }
}

impl std::error::Error for HandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WrongLength(_) => None,
            Self::InvalidDie { source, .. } => Some(source),
        }
    }
}

impl Hand {
    /// Build a hand from dice
    #[must_use]
    pub const fn new(dice: [Die; DICE_PER_HAND]) -> Self {
        Self(dice)
    }

    /// Build a hand from raw face values
    ///
    /// # Errors
    /// Returns `HandError` if there are not exactly five values or any value is
    /// outside 1..=6.
    ///
    /// # Examples
    /// ```
    /// use dice_duel::core::Hand;
    ///
    /// let hand = Hand::from_values(&[1, 2, 3, 4, 5]).unwrap();
    /// assert_eq!(hand.sum(), 15);
    ///
    /// assert!(Hand::from_values(&[1, 2, 3]).is_err());
    /// assert!(Hand::from_values(&[1, 2, 3, 4, 9]).is_err());
    /// ```
    pub fn from_values(values: &[u8]) -> Result<Self, HandError> {
        if values.len() != DICE_PER_HAND {
            return Err(HandError::WrongLength(values.len()));
        }

        let dice: Vec<Die> = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Die::new(value).map_err(|source| HandError::InvalidDie { index, source })
            })
            .collect::<Result<_, _>>()?;

        dice.try_into()
            .map(Self)
            .map_err(|rest: Vec<Die>| HandError::WrongLength(rest.len()))
    }

    /// Roll five fresh dice
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(std::array::from_fn(|_| Die::roll(rng)))
    }

    /// Sum of all five faces
    #[inline]
    #[must_use]
    pub fn sum(&self) -> u32 {
        self.0.iter().map(|d| u32::from(d.value())).sum()
    }

    /// The dice in order
    #[inline]
    #[must_use]
    pub const fn dice(&self) -> &[Die; DICE_PER_HAND] {
        &self.0
    }

    /// Face values in order
    #[must_use]
    pub fn values(&self) -> [u8; DICE_PER_HAND] {
        self.0.map(Die::value)
    }

    /// Die at a position (0-4)
    ///
    /// Returns `None` if `index >= 5`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Die> {
        self.0.get(index).copied()
    }

    pub(crate) fn set(&mut self, index: usize, die: Die) {
        self.0[index] = die;
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", faces.join(" "))
    }
}

/// Set of die positions kept across a reroll
///
/// Stored as a 5-bit mask; bit `i` set means die `i` is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HeldMask(u8);

impl HeldMask {
    /// No dice held
    pub const NONE: Self = Self(0);

    /// Every die held
    pub const ALL: Self = Self(0b1_1111);

    /// Build a mask from positions, ignoring any index >= 5
    #[must_use]
    pub fn from_indices(indices: &[usize]) -> Self {
        let mut mask = Self::NONE;
        for &i in indices {
            if i < DICE_PER_HAND {
                mask.0 |= 1 << i;
            }
        }
        mask
    }

    /// Whether die `index` is held
    #[inline]
    #[must_use]
    pub const fn is_held(self, index: usize) -> bool {
        index < DICE_PER_HAND && self.0 & (1 << index) != 0
    }

    /// Flip the hold on die `index`, returning the new hold state
    ///
    /// Returns `None` (and leaves the mask alone) if `index >= 5`.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        if index >= DICE_PER_HAND {
            return None;
        }
        self.0 ^= 1 << index;
        Some(self.is_held(index))
    }

    /// Set the hold on die `index`
    pub fn set(&mut self, index: usize, held: bool) {
        if index < DICE_PER_HAND {
            if held {
                self.0 |= 1 << index;
            } else {
                self.0 &= !(1 << index);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::NONE;
    }

    /// Number of held dice
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Held positions in ascending order
    #[must_use]
    pub fn indices(self) -> Vec<usize> {
        (0..DICE_PER_HAND).filter(|&i| self.is_held(i)).collect()
    }

    /// Positions that are not held
    #[must_use]
    pub fn free_indices(self) -> Vec<usize> {
        (0..DICE_PER_HAND).filter(|&i| !self.is_held(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hand_from_values_valid() {
        let hand = Hand::from_values(&[6, 5, 4, 3, 2]).unwrap();
        assert_eq!(hand.values(), [6, 5, 4, 3, 2]);
        assert_eq!(hand.sum(), 20);
    }

    #[test]
    fn hand_from_values_wrong_length() {
        assert_eq!(Hand::from_values(&[]), Err(HandError::WrongLength(0)));
        assert_eq!(
            Hand::from_values(&[1, 2, 3, 4, 5, 6]),
            Err(HandError::WrongLength(6))
        );
    }

    #[test]
    fn hand_from_values_reports_bad_position() {
        let err = Hand::from_values(&[1, 2, 0, 4, 5]).unwrap_err();
        assert_eq!(
            err,
            HandError::InvalidDie {
                index: 2,
                source: DieError::OutOfRange(0)
            }
        );
        assert_eq!(
            err.to_string(),
            "Die 3: Die face must be between 1 and 6, got 0"
        );
    }

    #[test]
    fn hand_roll_sum_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let hand = Hand::roll(&mut rng);
            assert!((5..=30).contains(&hand.sum()));
        }
    }

    #[test]
    fn hand_display() {
        let hand = Hand::from_values(&[1, 1, 2, 3, 6]).unwrap();
        assert_eq!(hand.to_string(), "[1 1 2 3 6]");
    }

    #[test]
    fn hand_get_out_of_range() {
        let hand = Hand::from_values(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(hand.get(4).map(Die::value), Some(5));
        assert!(hand.get(5).is_none());
    }

    #[test]
    fn held_mask_toggle() {
        let mut mask = HeldMask::NONE;
        assert_eq!(mask.toggle(2), Some(true));
        assert!(mask.is_held(2));
        assert_eq!(mask.toggle(2), Some(false));
        assert!(!mask.is_held(2));
        assert_eq!(mask.toggle(5), None);
        assert_eq!(mask, HeldMask::NONE);
    }

    #[test]
    fn held_mask_from_indices_ignores_invalid() {
        let mask = HeldMask::from_indices(&[0, 4, 9]);
        assert_eq!(mask.indices(), vec![0, 4]);
        assert_eq!(mask.free_indices(), vec![1, 2, 3]);
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn held_mask_set_and_clear() {
        let mut mask = HeldMask::NONE;
        mask.set(1, true);
        mask.set(3, true);
        mask.set(1, false);
        assert_eq!(mask.indices(), vec![3]);
        mask.clear();
        assert_eq!(mask.count(), 0);
        assert_eq!(HeldMask::ALL.count(), 5);
    }
}
