//! Cosmetic mappings used when rendering rows. Inputs are the wire names so
//! that unknown values fall through to gray.

use ratatui::style::Color;

pub fn status_color(status: &str) -> Color {
    match status {
        "completed" => Color::Green,
        "in_progress" => Color::Blue,
        "pending" => Color::Yellow,
        "cancelled" => Color::Red,
        _ => Color::Gray,
    }
}

pub fn priority_color(priority: &str) -> Color {
    match priority {
        "high" => Color::Red,
        "medium" => Color::Yellow,
        "low" => Color::Green,
        _ => Color::Gray,
    }
}

/// `in_progress` -> `in progress`
pub fn status_label(status: &str) -> String {
    status.replacen('_', " ", 1)
}
