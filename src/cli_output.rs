//! Standardized CLI output helpers for a consistent plugman experience.
//!
//! User-facing output goes through these instead of raw `println!`.

use colored::*;

pub const ICON_SUCCESS: &str = "\u{2713}"; // ✓
pub const ICON_ERROR: &str = "\u{2717}";   // ✗
pub const ICON_WARN: &str = "\u{26a0}";    // ⚠
pub const ICON_INFO: &str = "\u{25b6}";    // ▶
pub const ICON_HINT: &str = "\u{00b7}";    // ·
pub const ICON_DEP: &str = "+";

/// Print a success message: ✓ message
pub fn success(msg: &str) {
    println!("{} {}", ICON_SUCCESS.green(), msg);
}

/// Print an error message to stderr: ✗ message
pub fn error(msg: &str) {
    eprintln!("{} {}", ICON_ERROR.red(), msg);
}

/// Print a warning message: ⚠ message
pub fn warn(msg: &str) {
    println!("{} {}", ICON_WARN.yellow(), msg);
}

/// Print an info/action message: ▶ message
pub fn info(msg: &str) {
    println!("{} {}", ICON_INFO.cyan(), msg);
}

/// Print a dimmed hint: · message
pub fn hint(msg: &str) {
    println!("  {} {}", ICON_HINT.dimmed(), msg.dimmed());
}

/// Print a bold cyan header
pub fn header(msg: &str) {
    println!("{}", msg.cyan().bold());
}
