//! Formatting utilities for terminal output

use crate::core::{Die, Hand, HeldMask};

/// Unicode die face for a die
#[must_use]
pub const fn die_face(die: Die) -> char {
    match die.value() {
        1 => '⚀',
        2 => '⚁',
        3 => '⚂',
        4 => '⚃',
        5 => '⚄',
        _ => '⚅',
    }
}

/// Format a hand as die faces separated by spaces
#[must_use]
pub fn hand_to_faces(hand: &Hand) -> String {
    hand.dice()
        .iter()
        .map(|&d| die_face(d).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a hand with its values, bracketing held dice
///
/// `[4] 2 [6] 1 3` means dice 1 and 3 are held.
#[must_use]
pub fn hand_with_holds(hand: &Hand, held: HeldMask) -> String {
    hand.values()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if held.is_held(i) {
                format!("[{v}]")
            } else {
                format!(" {v} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format progress toward the target score as a bar
#[must_use]
pub fn score_bar(score: u32, target: u32, width: usize) -> String {
    create_progress_bar(f64::from(score), f64::from(target), width)
}

/// Format a probability as a whole percentage
#[must_use]
pub fn percent(p: f64) -> String {
    format!("{:.0}%", p * 100.0)
}
