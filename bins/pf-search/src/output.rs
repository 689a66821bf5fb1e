//! Terminal output helpers.

use owo_colors::OwoColorize;
use serde::Serialize;

/// Print a value as pretty JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a header
pub fn header(message: &str) {
    println!("{}", message.bold());
    println!("{}", "─".repeat(message.chars().count()));
}

/// Print one ranked line: position, score and label.
pub fn ranked(position: usize, score: &str, label: &str) {
    println!("{:>3}. {} {}", position, format!("[{score}]").cyan(), label);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Format a fuzzy score for display.
pub fn fuzzy_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Format a relevance score; 0 marks an unranked row.
pub fn relevance_score(score: u32) -> String {
    if score == 0 { "-".to_string() } else { score.to_string() }
}
