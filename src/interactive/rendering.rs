//! TUI rendering with ratatui
//!
//! Home screen, target entry and the game board.

use super::app::{App, HOME_MENU, MessageStyle, Screen};
use crate::core::{DICE_PER_HAND, Hand, HeldMask};
use crate::engine::{Game, Winner};
use crate::output::formatters::die_face;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    match (app.screen, app.game.as_ref()) {
        (Screen::Playing, Some(game)) => render_board(f, app, game, chunks[1]),
        (Screen::TargetEntry, _) => render_target_entry(f, app, chunks[1]),
        _ => render_home(f, app, chunks[1]),
    }

    render_status(f, app, chunks[2]);

    if app.show_about {
        render_about(f);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🎲 DICE DUEL - You vs the Computer")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_home(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = HOME_MENU
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i == app.menu_index {
                ListItem::new(format!("▶ {entry}")).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(format!("  {entry}"))
            }
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .title(" Welcome to the Dice Game! ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(menu, centered_rect(40, 40, area));
}

fn render_target_entry(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(centered_rect(60, 60, area));

    let input = Paragraph::new(app.target_input.as_str())
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .title(" Target Score (first to reach it wins) | Enter to start, Esc to go back ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(input, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_board(f: &mut Frame, app: &App, game: &Game, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Dice
            Constraint::Percentage(40), // Scores and messages
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Player dice
            Constraint::Length(6), // Computer dice
            Constraint::Min(4),    // Round info
        ])
        .split(chunks[0]);

    let round = game.round();
    let cursor = (!round.is_scored()).then_some(app.cursor);
    render_dice_row(
        f,
        " Your Dice (1-5 / Space to hold) ",
        round.player_hand(),
        round.held(),
        cursor,
        Color::Cyan,
        left[0],
    );

    // The computer's hand is only meaningful once it has played
    match &app.last_round {
        Some(summary) => render_dice_row(
            f,
            " Computer's Dice ",
            &summary.computer_hand,
            HeldMask::NONE,
            None,
            Color::Magenta,
            left[1],
        ),
        None => {
            let waiting = Paragraph::new("Waiting for you to score...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .title(" Computer's Dice ")
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                );
            f.render_widget(waiting, left[1]);
        }
    }

    render_round_info(f, app, game, left[2]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Player gauge
            Constraint::Length(3), // Computer gauge
            Constraint::Min(5),    // History
            Constraint::Length(7), // Messages
        ])
        .split(chunks[1]);

    let state = game.match_state();
    render_score_gauge(
        f,
        " You ",
        state.player_score,
        state.target_score,
        Color::Cyan,
        right[0],
    );
    render_score_gauge(
        f,
        " Computer ",
        state.computer_score,
        state.target_score,
        Color::Magenta,
        right[1],
    );
    render_history(f, game, right[2]);
    render_messages(f, app, right[3]);
}

fn render_dice_row(
    f: &mut Frame,
    title: &str,
    hand: &Hand,
    held: HeldMask,
    cursor: Option<usize>,
    color: Color,
    area: Rect,
) {
    let block = Block::default()
        .title(format!("{title}- sum {} ", hand.sum()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, DICE_PER_HAND as u32); DICE_PER_HAND])
        .split(inner);

    for (i, die) in hand.dice().iter().enumerate() {
        let is_held = held.is_held(i);
        let mut style = if is_held {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        if cursor == Some(i) {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }

        let label = if is_held { "HELD" } else { "" };
        let cell = Paragraph::new(vec![
            Line::from(Span::styled(format!("{} {}", die_face(*die), die), style)),
            Line::from(Span::styled(label, Style::default().fg(Color::Yellow))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
        f.render_widget(cell, cells[i]);
    }
}

fn render_round_info(f: &mut Frame, app: &App, game: &Game, area: Rect) {
    let round = game.round();
    let mut lines = vec![Line::from(vec![
        Span::raw("Round "),
        Span::styled(
            game.round_number().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Target {}", game.match_state().target_score)),
    ])];

    if let Some(result) = game.result() {
        let (text, color) = match result.winner {
            Winner::Player => ("🎉 YOU WIN THE MATCH! 🎉", Color::Green),
            Winner::Computer => ("🤖 The computer wins the match.", Color::Red),
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    } else if let Some(summary) = &app.last_round {
        lines.push(Line::from(format!(
            "Scored: you +{}, computer +{}",
            summary.delta.player, summary.delta.computer
        )));
        lines.push(Line::from("Enter: next round"));
    } else {
        let left = round.rolls_remaining();
        let roll_label = if left == 1 {
            "r: final roll".to_string()
        } else {
            format!("r: roll ({left} left)")
        };
        lines.push(Line::from(format!("{roll_label}   s: score now")));
    }

    let info = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Round ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(info, area);
}

fn render_score_gauge(
    f: &mut Frame,
    title: &str,
    score: u32,
    target: u32,
    color: Color,
    area: Rect,
) {
    let pct = if target == 0 {
        100
    } else {
        (u64::from(score) * 100 / u64::from(target)).min(100) as u16
    };
    let gauge = Gauge::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .percent(pct)
        .label(format!("{score}/{target}"));
    f.render_widget(gauge, area);
}

fn render_history(f: &mut Frame, game: &Game, area: Rect) {
    let items: Vec<ListItem> = game
        .history()
        .iter()
        .rev()
        .take(8)
        .map(|summary| {
            ListItem::new(format!(
                "{:>2}: +{:<2} vs +{:<2} → {} - {}",
                summary.round,
                summary.delta.player,
                summary.delta.computer,
                summary.player_total,
                summary.computer_total
            ))
        })
        .collect();

    let history =
        List::new(items).block(Block::default().title(" History ").borders(Borders::ALL));
    f.render_widget(history, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let tally = app.game.as_ref().map_or_else(
        || "Matches: 0 - 0".to_string(),
        |g| {
            let s = g.match_state();
            format!(
                "Matches won: you {} - {} computer | AI: {}",
                s.player_wins,
                s.computer_wins,
                g.config().strategy.name()
            )
        },
    );
    f.render_widget(Paragraph::new(tally).alignment(Alignment::Center), chunks[0]);

    let help_text = match app.screen {
        Screen::Home => "↑/↓: Select | Enter: Choose | a: About | q: Quit",
        Screen::TargetEntry => "Digits: Edit | Enter: Start | Esc: Back",
        Screen::Playing if app.match_over() => "n: New Match | Esc: Home | q: Quit",
        Screen::Playing => "r: Roll | 1-5/Space: Hold | s: Score | n: New | Esc: Home | q: Quit",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}

fn render_about(f: &mut Frame) {
    let area = centered_rect(60, 50, f.area());
    let text = vec![
        Line::from(Span::styled(
            "How to play",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Each round you get five dice and up to three rolls."),
        Line::from("Hold the dice you like; only unheld dice are rerolled."),
        Line::from("Score early with 's', or the third roll scores for you."),
        Line::from("Your round score is the sum of your dice."),
        Line::from(""),
        Line::from("The computer plays its own hand, taking more risks when it is"),
        Line::from("far behind. First past the target wins; equal scores past the"),
        Line::from("target go to a sudden-death tie-breaker."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let about = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" About ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, area);
    f.render_widget(about, area);
}

/// A rectangle of the given percentage size centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
