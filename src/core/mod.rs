//! Core domain types for the dice game
//!
//! Dice, hands and hold masks. Everything here is plain data with validated
//! constructors; randomness is always supplied by the caller.

mod die;
mod hand;

pub use die::{Die, DieError, MAX_FACE, MIN_FACE};
pub use hand::{DICE_PER_HAND, Hand, HandError, HeldMask};
