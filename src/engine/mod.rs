//! Round engine and game session
//!
//! Pure transition functions over explicit state, plus the `Game` reducer that
//! front ends drive.

pub mod game;
mod match_state;
mod round;

pub use game::{Action, Event, Game, GameError, RoundSummary};
pub use match_state::{
    MatchResult, MatchState, RoundDelta, Standing, TieBreak, Winner, check_winner,
    resolve_round, standing, tie_break,
};
pub use round::{ROLLS_PER_ROUND, RoundError, RoundPhase, RoundState, reroll, score};
