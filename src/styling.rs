//! Terminal styling and display formatting.
//!
//! Uses the anstyle ecosystem:
//! - anstream for auto-detecting color support (respects NO_COLOR, CLICOLOR_FORCE)
//! - anstyle for composable styles
//! - color-print's `cformat!` for user-facing messages

use anstyle::{AnsiColor, Color, Style};
use chrono::TimeDelta;
use unicode_width::UnicodeWidthStr;

/// Auto-detecting println that strips styles when stdout is not a terminal
pub use anstream::println;

/// Auto-detecting eprintln that strips styles when stderr is not a terminal
pub use anstream::eprintln;

// ============================================================================
// Style Constants
// ============================================================================

/// Column header style (bold)
pub const HEADER: Style = Style::new().bold();

/// Row label style (dimmed)
pub const LABEL: Style = Style::new().dimmed();

/// Figure title style (cyan + bold)
pub const TITLE: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

// ============================================================================
// Message Emojis
// ============================================================================

/// Error emoji: `cformat!("{ERROR_EMOJI} <red>message</>")`
pub const ERROR_EMOJI: &str = "❌";

/// Warning emoji: `cformat!("{WARNING_EMOJI} <yellow>message</>")`
pub const WARNING_EMOJI: &str = "🟡";

/// Hint emoji: `cformat!("{HINT_EMOJI} <dim>message</>")`
pub const HINT_EMOJI: &str = "💡";

/// Placeholder for undefined values in tables
pub const MISSING: &str = "-";

// ============================================================================
// Value Formatting
// ============================================================================

/// Format an elapsed duration as `H:MM:SS`.
///
/// Hours are not wrapped at 24, so a two-day capture reads `48:00:00`.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    format!(
        "{sign}{}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

/// Format a latency in milliseconds with its unit, e.g. `27.5 ms`.
///
/// Whole values print without decimals; others keep up to two.
pub fn format_latency(ms: Option<f64>) -> String {
    match ms {
        Some(ms) => format!("{} ms", round2(ms)),
        None => MISSING.to_string(),
    }
}

/// Format a latency rounded to exactly two decimals, e.g. `15.81 ms`.
pub fn format_latency_fixed(ms: Option<f64>) -> String {
    match ms {
        Some(ms) => format!("{ms:.2} ms"),
        None => MISSING.to_string(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Visual width of text in terminal columns (unicode-aware, no ANSI codes).
pub fn visual_width(text: &str) -> usize {
    text.width()
}
