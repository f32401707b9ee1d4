//! CLI output formatting utilities.

use crate::nhl::{ComparisonReport, PlayerRecord, TIED};
use crate::schema::ToolDefinition;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print a player's season line.
    pub fn player_record(record: &PlayerRecord) {
        Self::header(&format!(
            "{} ({}, {})",
            record.player_name,
            display_or_dash(&record.team),
            display_or_dash(&record.position)
        ));
        Self::kv("GP", &record.games_played.to_string());
        Self::kv("G-A-P", &format!("{}-{}-{}", record.goals, record.assists, record.points));
        Self::kv("Shots", &format!("{} ({:.1}%)", record.shots, record.shooting_pct));
        Self::kv(
            "PP",
            &format!("{} G, {} P", record.power_play_goals, record.power_play_points),
        );
        Self::kv(
            "SH",
            &format!("{} G, {} P", record.shorthanded_goals, record.shorthanded_points),
        );
        Self::kv(
            "GWG / OTG",
            &format!("{} / {}", record.game_winning_goals, record.ot_goals),
        );
        Self::kv("+/-", &format!("{:+}", record.plus_minus));
        Self::kv("PIM", &record.penalty_minutes.to_string());
    }

    /// Print a comparison as one line per field.
    pub fn comparison(report: &ComparisonReport) {
        Self::header(&format!("{} vs {}", report.player_a, report.player_b));
        for field in &report.fields {
            let leader = if field.leader == TIED {
                style(field.leader.as_str()).dim()
            } else {
                style(field.leader.as_str()).green()
            };
            println!(
                "  {:<20} {:>7} {:>7} {:>8}  {}",
                style(&field.field).dim(),
                field.value_a.to_string(),
                field.value_b.to_string(),
                field.difference.to_string(),
                leader
            );
        }
    }

    /// Print a tool definition with its parameters.
    pub fn tool(tool: &ToolDefinition) {
        println!("\n{} {}", style(">>").green(), style(&tool.name).bold());
        if !tool.description.is_empty() {
            println!("   {}", tool.description);
        }
        for param in &tool.parameters {
            let required = if param.required { " (required)" } else { "" };
            println!(
                "   {} {}: {}{}",
                style("-").cyan(),
                param.name,
                style(&param.param_type).dim(),
                required
            );
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

fn display_or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// Truncate to `max_chars` characters with an ellipsis.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
