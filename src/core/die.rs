//! Single six-sided die
//!
//! A `Die` can only hold a face value in 1..=6; construction validates the range.

use rand::Rng;
use std::fmt;

/// Lowest face on a die
pub const MIN_FACE: u8 = 1;

/// Highest face on a die
pub const MAX_FACE: u8 = 6;

/// A six-sided die showing one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Die(u8);

/// Error type for invalid die faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DieError {
    OutOfRange(u8),
}

impl fmt::Display for DieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(value) => {
                write!(f, "Die face must be between 1 and 6, got {value}")
            }
        }
    }
}

impl std::error::Error for DieError {}

impl Die {
    /// Create a die showing the given face
    ///
    /// # Errors
    /// Returns `DieError::OutOfRange` if `value` is not in 1..=6.
    ///
    /// # Examples
    /// ```
    /// use dice_duel::core::Die;
    ///
    /// assert_eq!(Die::new(4).unwrap().value(), 4);
    /// assert!(Die::new(0).is_err());
    /// assert!(Die::new(7).is_err());
    /// ```
    pub const fn new(value: u8) -> Result<Self, DieError> {
        if value >= MIN_FACE && value <= MAX_FACE {
            Ok(Self(value))
        } else {
            Err(DieError::OutOfRange(value))
        }
    }

    /// Roll a fresh die, uniform over 1..=6
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(MIN_FACE..=MAX_FACE))
    }

    /// Face value (1..=6)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn die_accepts_every_face() {
        for face in 1..=6 {
            assert_eq!(Die::new(face).unwrap().value(), face);
        }
    }

    #[test]
    fn die_rejects_out_of_range() {
        assert_eq!(Die::new(0), Err(DieError::OutOfRange(0)));
        assert_eq!(Die::new(7), Err(DieError::OutOfRange(7)));
        assert_eq!(Die::new(255), Err(DieError::OutOfRange(255)));
    }

    #[test]
    fn die_roll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let die = Die::roll(&mut rng);
            assert!((MIN_FACE..=MAX_FACE).contains(&die.value()));
        }
    }

    #[test]
    fn die_roll_covers_all_faces() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 6];
        for _ in 0..1_000 {
            seen[usize::from(Die::roll(&mut rng).value() - 1)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn die_error_display() {
        let err = Die::new(9).unwrap_err();
        assert_eq!(err.to_string(), "Die face must be between 1 and 6, got 9");
    }
}
