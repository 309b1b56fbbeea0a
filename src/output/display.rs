//! Display functions for command results

use super::formatters::{die_face, percent, score_bar};
use crate::commands::{AdviceResult, SimulationResult};
use colored::Colorize;

/// Print the computer's view of a hand
pub fn print_advice_result(result: &AdviceResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "COMPUTER ADVICE:".bright_cyan().bold(),
        result.hand.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let ctx = &result.context;
    println!(
        "\n📊 Scores: computer {} / player {} (target {})",
        ctx.computer_score, ctx.player_score, ctx.target_score
    );
    println!(
        "   Computer needs {}, player needs {}",
        ctx.computer_deficit(),
        ctx.player_deficit()
    );
    println!(
        "   Computer [{}]",
        score_bar(ctx.computer_score, ctx.target_score, 30).magenta()
    );
    println!(
        "   Player   [{}]",
        score_bar(ctx.player_score, ctx.target_score, 30).cyan()
    );

    let tier = result
        .tier
        .map_or_else(|| "none".to_string(), |t| t.name().to_uppercase());
    println!(
        "\n🎯 Strategy: {}   Tier: {}",
        result.strategy.bright_magenta(),
        tier.bright_yellow().bold()
    );
    println!("\n   Die  Face  Reroll chance");
    for (i, (die, &p)) in result
        .hand
        .dice()
        .iter()
        .zip(&result.reroll_probabilities)
        .enumerate()
    {
        let chance = percent(p);
        let chance = if p == 0.0 {
            chance.bright_black()
        } else if p >= 0.5 {
            chance.red()
        } else {
            chance.yellow()
        };
        println!("   {}    {} {}    {chance}", i + 1, die_face(*die), die);
    }

    println!(
        "\n   Expected rerolls:  {:.2} dice",
        result.expected_rerolls
    );
    println!(
        "   Expected sum:      {:.2} (now {})",
        result.expected_sum,
        result.hand.sum()
    );
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Matches:".bright_cyan().bold());
    println!(
        "   Computer ({}) vs player ({})",
        result.computer_strategy.bright_magenta(),
        result.player_strategy.bright_cyan()
    );
    println!("   Matches played:   {}", result.matches);
    println!(
        "   Computer wins:    {} {}",
        result.computer_wins,
        format!("({:.1}%)", result.computer_win_rate() * 100.0)
            .bright_yellow()
            .bold()
    );
    println!("   Player wins:      {}", result.player_wins);
    println!("   Tie-breakers:     {}", result.tie_breaks);
    println!(
        "   Average rounds:   {}",
        format!("{:.2}", result.average_rounds).bright_yellow()
    );
    println!(
        "   Shortest/longest: {}/{}",
        result.min_rounds.to_string().green(),
        result.max_rounds.to_string().yellow()
    );
    println!("   Average margin:   {:.1} points", result.average_margin);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());

    if result.matches == 0 {
        return;
    }

    println!("\n📈 {}", "Rounds per match:".bright_cyan().bold());
    let mut rounds: Vec<(u32, usize)> = result
        .rounds_distribution
        .iter()
        .map(|(&r, &c)| (r, c))
        .collect();
    rounds.sort_unstable();
    for (round_count, count) in rounds {
        let pct = (count as f64 / result.matches as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░"
                .repeat(40_usize.saturating_sub(bar_width))
                .bright_black()
        );
        println!("   {round_count:3}: {bar} {count:6} ({pct:5.1}%)");
    }
}
