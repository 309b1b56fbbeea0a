//! Match scoring, winner detection and the tie-breaker

use super::round::score;
use crate::core::Hand;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use tracing::info;

/// Which side won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Player,
    Computer,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Computer => write!(f, "Computer"),
        }
    }
}

/// Points each side earns from one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundDelta {
    pub player: u32,
    pub computer: u32,
}

/// Score both final hands of a round
#[must_use]
pub fn resolve_round(player_hand: &Hand, computer_hand: &Hand) -> RoundDelta {
    RoundDelta {
        player: score(player_hand),
        computer: score(computer_hand),
    }
}

/// Running scores for the current match plus session-wide win tallies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub player_score: u32,
    pub computer_score: u32,
    pub target_score: u32,
    pub player_wins: u32,
    pub computer_wins: u32,
}

impl MatchState {
    #[must_use]
    pub const fn new(target_score: u32) -> Self {
        Self {
            player_score: 0,
            computer_score: 0,
            target_score,
            player_wins: 0,
            computer_wins: 0,
        }
    }

    /// Add a round's points to both scores at once
    pub const fn apply(&mut self, delta: RoundDelta) {
        self.player_score += delta.player;
        self.computer_score += delta.computer;
    }

    /// Count a finished match in the tallies
    pub const fn record_win(&mut self, winner: Winner) {
        match winner {
            Winner::Player => self.player_wins += 1,
            Winner::Computer => self.computer_wins += 1,
        }
    }

    /// Reset scores for a fresh match, keeping target and tallies
    pub const fn reset_scores(&mut self) {
        self.player_score = 0;
        self.computer_score = 0;
    }
}

/// Deterministic part of winner detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    InProgress,
    Decided(Winner),
    TieBreakRequired,
}

/// Classify the scores without touching randomness
#[must_use]
pub fn standing(state: &MatchState) -> Standing {
    let player_done = state.player_score >= state.target_score;
    let computer_done = state.computer_score >= state.target_score;

    match (player_done, computer_done) {
        (false, false) => Standing::InProgress,
        (true, false) => Standing::Decided(Winner::Player),
        (false, true) => Standing::Decided(Winner::Computer),
        (true, true) => match state.player_score.cmp(&state.computer_score) {
            Ordering::Greater => Standing::Decided(Winner::Player),
            Ordering::Less => Standing::Decided(Winner::Computer),
            Ordering::Equal => Standing::TieBreakRequired,
        },
    }
}

/// Outcome of a sudden-death tie-breaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieBreak {
    pub winner: Winner,
    pub player_hand: Hand,
    pub computer_hand: Hand,
    /// Throws made, including the deciding one
    pub attempts: u32,
}

/// Roll fresh hands for both sides until the sums differ; the higher sum wins
///
/// Unbounded, but each attempt ends the loop with probability above 0.9.
pub fn tie_break<R: Rng + ?Sized>(rng: &mut R) -> TieBreak {
    let mut attempts = 0;
    loop {
        attempts += 1;
        let player_hand = Hand::roll(rng);
        let computer_hand = Hand::roll(rng);

        let winner = match score(&player_hand).cmp(&score(&computer_hand)) {
            Ordering::Greater => Winner::Player,
            Ordering::Less => Winner::Computer,
            Ordering::Equal => continue,
        };

        info!(%winner, attempts, "tie-breaker decided");
        return TieBreak {
            winner,
            player_hand,
            computer_hand,
            attempts,
        };
    }
}

/// A decided match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: Winner,
    pub tie_break: Option<TieBreak>,
}

/// Decide the match if a threshold has been crossed
///
/// Equal scores at or above target always go through [`tie_break`].
pub fn check_winner<R: Rng + ?Sized>(state: &MatchState, rng: &mut R) -> Option<MatchResult> {
    match standing(state) {
        Standing::InProgress => None,
        Standing::Decided(winner) => Some(MatchResult {
            winner,
            tie_break: None,
        }),
        Standing::TieBreakRequired => {
            info!(
                score = state.player_score,
                target_score = state.target_score,
                "scores tied at target, running tie-breaker"
            );
            let tb = tie_break(rng);
            Some(MatchResult {
                winner: tb.winner,
                tie_break: Some(tb),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn state(player: u32, computer: u32) -> MatchState {
        MatchState {
            player_score: player,
            computer_score: computer,
            ..MatchState::new(101)
        }
    }

    #[test]
    fn resolve_round_sums_each_hand() {
        let p = Hand::from_values(&[3, 3, 3, 3, 3]).unwrap();
        let c = Hand::from_values(&[1, 2, 3, 4, 2]).unwrap();
        assert_eq!(
            resolve_round(&p, &c),
            RoundDelta {
                player: 15,
                computer: 12
            }
        );
    }

    #[test]
    fn apply_adds_both_scores() {
        let mut m = state(10, 20);
        m.apply(RoundDelta {
            player: 15,
            computer: 12,
        });
        assert_eq!((m.player_score, m.computer_score), (25, 32));
    }

    #[test]
    fn standing_cases() {
        assert_eq!(standing(&state(0, 0)), Standing::InProgress);
        assert_eq!(standing(&state(100, 100)), Standing::InProgress);
        assert_eq!(
            standing(&state(101, 100)),
            Standing::Decided(Winner::Player)
        );
        assert_eq!(
            standing(&state(90, 120)),
            Standing::Decided(Winner::Computer)
        );
        assert_eq!(
            standing(&state(110, 105)),
            Standing::Decided(Winner::Player)
        );
        assert_eq!(
            standing(&state(105, 110)),
            Standing::Decided(Winner::Computer)
        );
        assert_eq!(standing(&state(101, 101)), Standing::TieBreakRequired);
    }

    #[test]
    fn check_winner_no_winner_below_target() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(check_winner(&state(15, 12), &mut rng).is_none());
    }

    #[test]
    fn check_winner_single_crossing() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = check_winner(&state(103, 80), &mut rng).unwrap();
        assert_eq!(result.winner, Winner::Player);
        assert!(result.tie_break.is_none());
    }

    #[test]
    fn check_winner_tie_invokes_tie_break() {
        let mut rng = StdRng::seed_from_u64(77);
        let result = check_winner(&state(101, 101), &mut rng).unwrap();
        let tb = result.tie_break.expect("tie-break must run on equal scores");
        assert_eq!(result.winner, tb.winner);
        assert_ne!(tb.player_hand.sum(), tb.computer_hand.sum());
    }

    #[test]
    fn tie_break_winner_has_higher_sum() {
        let mut rng = StdRng::seed_from_u64(123);
        for _ in 0..200 {
            let tb = tie_break(&mut rng);
            assert!(tb.attempts >= 1);
            match tb.winner {
                Winner::Player => assert!(tb.player_hand.sum() > tb.computer_hand.sum()),
                Winner::Computer => assert!(tb.computer_hand.sum() > tb.player_hand.sum()),
            }
        }
    }

    #[test]
    fn record_win_and_reset() {
        let mut m = state(120, 90);
        m.record_win(Winner::Player);
        m.record_win(Winner::Computer);
        m.record_win(Winner::Player);
        m.reset_scores();
        assert_eq!((m.player_score, m.computer_score), (0, 0));
        assert_eq!((m.player_wins, m.computer_wins), (2, 1));
        assert_eq!(m.target_score, 101);
    }
}
