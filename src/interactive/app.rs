//! TUI application state and logic

use crate::config::{GameConfig, parse_target};
use crate::core::DICE_PER_HAND;
use crate::engine::{Action, Event, Game, RoundSummary, Winner};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Entries on the home screen menu
pub const HOME_MENU: [&str; 3] = ["New Game", "About", "Quit"];

/// Application state
pub struct App {
    pub config: GameConfig,
    pub screen: Screen,
    pub game: Option<Game>,
    pub menu_index: usize,
    pub show_about: bool,
    pub target_input: String,
    pub cursor: usize,
    pub last_round: Option<RoundSummary>,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    TargetEntry,
    Playing,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            target_input: config.target_score.to_string(),
            config,
            screen: Screen::Home,
            game: None,
            menu_index: 0,
            show_about: false,
            cursor: 0,
            last_round: None,
            messages: vec![Message {
                text: "Welcome to Dice Duel!".to_string(),
                style: MessageStyle::Info,
            }],
            should_quit: false,
        }
    }

    pub fn menu_up(&mut self) {
        self.menu_index = self
            .menu_index
            .checked_sub(1)
            .unwrap_or(HOME_MENU.len() - 1);
    }

    pub fn menu_down(&mut self) {
        self.menu_index = (self.menu_index + 1) % HOME_MENU.len();
    }

    pub fn activate_menu(&mut self) {
        match self.menu_index {
            0 => {
                self.screen = Screen::TargetEntry;
                self.add_message(
                    "Enter a target score and press Enter",
                    MessageStyle::Info,
                );
            }
            1 => self.show_about = true,
            _ => self.should_quit = true,
        }
    }

    /// Validate the typed target and start a game with it
    pub fn submit_target(&mut self) {
        match parse_target(&self.target_input) {
            Ok(target) => {
                self.config.target_score = target;
                // Win tallies last for the whole session
                let game = match &self.game {
                    Some(previous) => {
                        let state = previous.match_state();
                        Game::with_tallies(
                            self.config.clone(),
                            state.player_wins,
                            state.computer_wins,
                        )
                    }
                    None => Game::new(self.config.clone()),
                };
                self.game = Some(game);
                self.last_round = None;
                self.cursor = 0;
                self.screen = Screen::Playing;
                self.add_message(
                    &format!("First to {target} wins. Good luck!"),
                    MessageStyle::Success,
                );
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
        self.menu_index = 0;
    }

    pub fn move_cursor(&mut self, right: bool) {
        self.cursor = if right {
            (self.cursor + 1) % DICE_PER_HAND
        } else {
            self.cursor.checked_sub(1).unwrap_or(DICE_PER_HAND - 1)
        };
    }

    pub fn toggle_hold(&mut self, index: usize) {
        self.cursor = index.min(DICE_PER_HAND - 1);
        self.dispatch(Action::ToggleHold(index));
    }

    pub fn roll(&mut self) {
        self.dispatch(Action::Roll);
    }

    pub fn score_now(&mut self) {
        self.dispatch(Action::ScoreNow);
    }

    pub fn next_round(&mut self) {
        self.dispatch(Action::NextRound);
    }

    pub fn new_match(&mut self) {
        self.dispatch(Action::NewMatch);
    }

    /// Whether the current round has been scored and awaits the next deal
    #[must_use]
    pub fn round_finished(&self) -> bool {
        self.game.as_ref().is_some_and(|g| g.round().is_scored())
    }

    #[must_use]
    pub fn match_over(&self) -> bool {
        self.game.as_ref().is_some_and(Game::is_over)
    }

    fn dispatch(&mut self, action: Action) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        match game.apply(action) {
            Ok(Event::Rolled {
                rolls_remaining, ..
            }) => {
                let text = if rolls_remaining == 1 {
                    "Rolled. One roll left - the next one is final.".to_string()
                } else {
                    format!("Rolled. {rolls_remaining} rolls left.")
                };
                self.add_message(&text, MessageStyle::Info);
            }
            Ok(Event::HoldToggled { .. }) => {}
            Ok(Event::RoundScored(summary)) => self.on_round_scored(summary),
            Ok(Event::RoundStarted { round }) => {
                self.last_round = None;
                self.add_message(&format!("Round {round}. Roll away!"), MessageStyle::Info);
            }
            Ok(Event::MatchStarted) => {
                self.last_round = None;
                self.cursor = 0;
                self.add_message("New match started!", MessageStyle::Info);
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    fn on_round_scored(&mut self, summary: RoundSummary) {
        self.add_message(
            &format!(
                "Round {}: you +{}, computer +{}",
                summary.round, summary.delta.player, summary.delta.computer
            ),
            MessageStyle::Info,
        );

        if let Some(result) = &summary.result {
            if let Some(tb) = &result.tie_break {
                self.add_message(
                    &format!(
                        "Dead heat! Tie-breaker: {} vs {} after {} throw(s)",
                        tb.player_hand.sum(),
                        tb.computer_hand.sum(),
                        tb.attempts
                    ),
                    MessageStyle::Info,
                );
            }
            match result.winner {
                Winner::Player => self.add_message("🎉 YOU WIN! 🎉", MessageStyle::Success),
                Winner::Computer => self.add_message("🤖 The computer wins.", MessageStyle::Error),
            }
            self.add_message("Press 'n' for a new match or Esc for home.", MessageStyle::Info);
        } else {
            self.add_message("Press Enter for the next round.", MessageStyle::Info);
        }

        self.last_round = Some(summary);
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let TermEvent::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                app.should_quit = true;
            }

            match app.screen {
                Screen::Home if app.show_about => {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                        app.show_about = false;
                    }
                }
                Screen::Home => match key.code {
                    KeyCode::Up | KeyCode::Char('k') => app.menu_up(),
                    KeyCode::Down | KeyCode::Char('j') => app.menu_down(),
                    KeyCode::Enter => app.activate_menu(),
                    KeyCode::Char('a') => app.show_about = true,
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                    _ => {}
                },
                Screen::TargetEntry => match key.code {
                    KeyCode::Esc => app.go_home(),
                    KeyCode::Enter => app.submit_target(),
                    KeyCode::Backspace => {
                        app.target_input.pop();
                    }
                    KeyCode::Char(c) if c.is_ascii_digit() && app.target_input.len() < 6 => {
                        app.target_input.push(c);
                    }
                    _ => {}
                },
                Screen::Playing => match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Esc => app.go_home(),
                    KeyCode::Char('n') => app.new_match(),
                    KeyCode::Char(c @ '1'..='5') => {
                        app.toggle_hold(usize::from(c as u8 - b'1'));
                    }
                    KeyCode::Left => app.move_cursor(false),
                    KeyCode::Right => app.move_cursor(true),
                    KeyCode::Char(' ') => app.toggle_hold(app.cursor),
                    KeyCode::Char('s') => app.score_now(),
                    KeyCode::Enter | KeyCode::Char('r') if app.round_finished() => {
                        if !app.match_over() {
                            app.next_round();
                        }
                    }
                    KeyCode::Char('r') => app.roll(),
                    _ => {}
                },
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
