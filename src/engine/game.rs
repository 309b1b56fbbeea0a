//! Game session
//!
//! Owns the only mutable copy of match and round state. Front ends translate
//! user input into [`Action`]s and render the [`Event`]s that come back.

use super::match_state::{MatchResult, MatchState, RoundDelta, check_winner, resolve_round};
use super::round::{RoundError, RoundState};
use crate::config::GameConfig;
use crate::core::Hand;
use crate::opponent::{ComputerStrategy, ScoreContext};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use tracing::info;

/// A player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reroll unheld dice; the last roll of a round also scores it
    Roll,
    /// Flip the hold on die 0-4
    ToggleHold(usize),
    /// Finalize the current hands without rolling again
    ScoreNow,
    /// Deal the next round after a scored one
    NextRound,
    /// Abandon or restart the match, keeping the win tallies
    NewMatch,
}

/// What an action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Rolled { hand: Hand, rolls_remaining: u8 },
    HoldToggled { index: usize, held: bool },
    RoundScored(RoundSummary),
    RoundStarted { round: u32 },
    MatchStarted,
}

/// Record of one scored round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u32,
    pub player_hand: Hand,
    pub computer_hand: Hand,
    pub delta: RoundDelta,
    pub player_total: u32,
    pub computer_total: u32,
    pub result: Option<MatchResult>,
}

/// Error type for actions that are not valid right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    Round(RoundError),
    MatchOver,
    RoundInProgress,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Round(err) => write!(f, "{err}"),
            Self::MatchOver => write!(f, "The match is over; start a new one"),
            Self::RoundInProgress => write!(f, "Finish the current round first"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Round(err) => Some(err),
            Self::MatchOver | Self::RoundInProgress => None,
        }
    }
}

impl From<RoundError> for GameError {
    fn from(err: RoundError) -> Self {
        Self::Round(err)
    }
}

/// A human-vs-computer session
pub struct Game {
    config: GameConfig,
    match_state: MatchState,
    round: RoundState,
    round_number: u32,
    history: Vec<RoundSummary>,
    result: Option<MatchResult>,
    rng: StdRng,
}

impl Game {
    /// Start a session and deal the first round
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let round = RoundState::new(&mut rng);

        info!(
            target_score = config.target_score,
            strategy = %config.strategy.name(),
            seed = ?config.seed,
            "match started"
        );

        Self {
            match_state: MatchState::new(config.target_score),
            config,
            round,
            round_number: 1,
            history: Vec::new(),
            result: None,
            rng,
        }
    }

    /// Start a session that continues earlier match tallies
    #[must_use]
    pub fn with_tallies(config: GameConfig, player_wins: u32, computer_wins: u32) -> Self {
        let mut game = Self::new(config);
        game.match_state.player_wins = player_wins;
        game.match_state.computer_wins = computer_wins;
        game
    }

    /// Apply one action
    ///
    /// # Errors
    /// Returns `GameError` when the action is not valid in the current state;
    /// the state is left unchanged in that case.
    pub fn apply(&mut self, action: Action) -> Result<Event, GameError> {
        match action {
            Action::NewMatch => Ok(self.new_match()),
            _ if self.result.is_some() => Err(GameError::MatchOver),
            Action::Roll => self.roll(),
            Action::ToggleHold(index) => {
                let held = self.round.toggle_hold(index)?;
                Ok(Event::HoldToggled { index, held })
            }
            Action::ScoreNow => self.score_round(),
            Action::NextRound => self.next_round(),
        }
    }

    fn roll(&mut self) -> Result<Event, GameError> {
        let rolls_remaining = self.round.roll(&mut self.rng)?;
        if rolls_remaining == 0 {
            return self.score_round();
        }
        Ok(Event::Rolled {
            hand: *self.round.player_hand(),
            rolls_remaining,
        })
    }

    fn score_round(&mut self) -> Result<Event, GameError> {
        if self.round.is_scored() {
            return Err(RoundError::AlreadyScored.into());
        }

        let context = ScoreContext::from_match(&self.match_state);
        let computer_hand =
            self.config
                .strategy
                .play_turn(self.round.computer_hand(), &context, &mut self.rng);
        self.round.close(computer_hand)?;

        let delta = resolve_round(self.round.player_hand(), self.round.computer_hand());
        self.match_state.apply(delta);

        let result = check_winner(&self.match_state, &mut self.rng);
        if let Some(ref decided) = result {
            self.match_state.record_win(decided.winner);
            info!(
                winner = %decided.winner,
                player = self.match_state.player_score,
                computer = self.match_state.computer_score,
                tie_break = decided.tie_break.is_some(),
                "match decided"
            );
        }

        info!(
            round = self.round_number,
            player_hand = %self.round.player_hand(),
            computer_hand = %self.round.computer_hand(),
            player_total = self.match_state.player_score,
            computer_total = self.match_state.computer_score,
            "round scored"
        );

        let summary = RoundSummary {
            round: self.round_number,
            player_hand: *self.round.player_hand(),
            computer_hand: *self.round.computer_hand(),
            delta,
            player_total: self.match_state.player_score,
            computer_total: self.match_state.computer_score,
            result: result.clone(),
        };
        self.result = result;
        self.history.push(summary.clone());

        Ok(Event::RoundScored(summary))
    }

    fn next_round(&mut self) -> Result<Event, GameError> {
        if !self.round.is_scored() {
            return Err(GameError::RoundInProgress);
        }
        self.round = RoundState::new(&mut self.rng);
        self.round_number += 1;
        Ok(Event::RoundStarted {
            round: self.round_number,
        })
    }

    fn new_match(&mut self) -> Event {
        self.match_state.reset_scores();
        self.round = RoundState::new(&mut self.rng);
        self.round_number = 1;
        self.history.clear();
        self.result = None;
        info!(target_score = self.match_state.target_score, "match restarted");
        Event::MatchStarted
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    #[must_use]
    pub const fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Scored rounds of the current match, oldest first
    #[must_use]
    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    /// The decided result, once the match is over
    #[must_use]
    pub const fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.result.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ROLLS_PER_ROUND, RoundPhase, Winner};

    fn game(target: u32, seed: u64) -> Game {
        Game::new(GameConfig::new(target).with_seed(Some(seed)))
    }

    #[test]
    fn new_game_starts_fresh() {
        let g = game(101, 1);
        assert_eq!(g.round_number(), 1);
        assert_eq!(g.round().rolls_remaining(), ROLLS_PER_ROUND);
        assert_eq!(g.match_state().player_score, 0);
        assert!(!g.is_over());
    }

    #[test]
    fn three_rolls_then_scored() {
        let mut g = game(101, 2);
        assert!(matches!(
            g.apply(Action::Roll),
            Ok(Event::Rolled {
                rolls_remaining: 2,
                ..
            })
        ));
        assert!(matches!(
            g.apply(Action::Roll),
            Ok(Event::Rolled {
                rolls_remaining: 1,
                ..
            })
        ));
        let Ok(Event::RoundScored(summary)) = g.apply(Action::Roll) else {
            panic!("final roll should score the round");
        };
        assert_eq!(g.round().phase(), RoundPhase::Scored);
        assert_eq!(summary.player_total, summary.player_hand.sum());
        assert_eq!(summary.computer_total, summary.computer_hand.sum());
        assert_eq!(
            g.apply(Action::Roll),
            Err(GameError::Round(RoundError::AlreadyScored))
        );
    }

    #[test]
    fn score_now_finalizes_current_hand() {
        let mut g = game(101, 3);
        let hand = *g.round().player_hand();
        let Ok(Event::RoundScored(summary)) = g.apply(Action::ScoreNow) else {
            panic!("score now should score the round");
        };
        assert_eq!(summary.player_hand, hand);
        assert_eq!(summary.delta.player, hand.sum());
        assert_eq!(g.history().len(), 1);
    }

    #[test]
    fn holds_survive_rolls() {
        let mut g = game(101, 4);
        let first = g.round().player_hand().values()[0];
        assert_eq!(
            g.apply(Action::ToggleHold(0)),
            Ok(Event::HoldToggled {
                index: 0,
                held: true
            })
        );
        g.apply(Action::Roll).unwrap();
        g.apply(Action::Roll).unwrap();
        assert_eq!(g.round().player_hand().values()[0], first);
    }

    #[test]
    fn next_round_requires_scored_round() {
        let mut g = game(101, 5);
        assert_eq!(g.apply(Action::NextRound), Err(GameError::RoundInProgress));
        g.apply(Action::ScoreNow).unwrap();
        assert_eq!(g.apply(Action::NextRound), Ok(Event::RoundStarted { round: 2 }));
        assert_eq!(g.round().rolls_remaining(), ROLLS_PER_ROUND);
        assert_eq!(g.round().held().count(), 0);
    }

    #[test]
    fn bad_hold_index_is_rejected() {
        let mut g = game(101, 6);
        assert_eq!(
            g.apply(Action::ToggleHold(7)),
            Err(GameError::Round(RoundError::InvalidDieIndex(7)))
        );
    }

    #[test]
    fn match_runs_to_a_winner() {
        let mut g = game(101, 7);
        // Each round adds at least 5 to both sides, so 21 rounds must cross 101
        for _ in 0..21 {
            g.apply(Action::ScoreNow).unwrap();
            if g.is_over() {
                break;
            }
            g.apply(Action::NextRound).unwrap();
        }
        assert!(g.is_over());
        assert_eq!(g.apply(Action::Roll), Err(GameError::MatchOver));
        assert_eq!(g.apply(Action::NextRound), Err(GameError::MatchOver));

        let state = g.match_state();
        assert_eq!(state.player_wins + state.computer_wins, 1);
        let winner = g.result().unwrap().winner;
        if state.player_score != state.computer_score {
            let expected = if state.player_score > state.computer_score {
                Winner::Player
            } else {
                Winner::Computer
            };
            assert_eq!(winner, expected);
        }
    }

    #[test]
    fn new_match_keeps_tallies() {
        let mut g = game(101, 8);
        while !g.is_over() {
            g.apply(Action::ScoreNow).unwrap();
            if !g.is_over() {
                g.apply(Action::NextRound).unwrap();
            }
        }
        assert_eq!(g.apply(Action::NewMatch), Ok(Event::MatchStarted));
        assert!(!g.is_over());
        assert!(g.history().is_empty());
        assert_eq!(g.match_state().player_score, 0);
        assert_eq!(
            g.match_state().player_wins + g.match_state().computer_wins,
            1
        );
    }

    #[test]
    fn with_tallies_carries_wins_only() {
        let g = Game::with_tallies(GameConfig::new(150).with_seed(Some(3)), 2, 5);
        let state = g.match_state();
        assert_eq!((state.player_wins, state.computer_wins), (2, 5));
        assert_eq!((state.player_score, state.computer_score), (0, 0));
        assert_eq!(state.target_score, 150);
        assert_eq!(g.round_number(), 1);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = game(101, 42);
        let mut b = game(101, 42);
        for action in [Action::ToggleHold(1), Action::Roll, Action::ScoreNow] {
            assert_eq!(a.apply(action), b.apply(action));
        }
    }
}
