//! Terminal output: color control and shared formatting.
//!
//! Color follows the usual conventions, in order of precedence:
//!
//! - `NO_COLOR` set to anything disables color (https://no-color.org/)
//! - `CLICOLOR_FORCE` set to anything but `0` forces color
//! - `CLICOLOR=0` disables color
//! - otherwise color is on only when stdout is a terminal

use colored::{ColoredString, Colorize, control};
use jdkup::catalog::ReleaseEntry;
use std::io::IsTerminal;

/// Configure `colored` for the whole process. Call once, early in `main`.
pub fn init_colors() {
    let enabled = color_enabled(
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("CLICOLOR_FORCE").ok().as_deref(),
        std::env::var("CLICOLOR").ok().as_deref(),
        std::io::stdout().is_terminal(),
    );
    control::set_override(enabled);
}

fn color_enabled(
    no_color: bool,
    clicolor_force: Option<&str>,
    clicolor: Option<&str>,
    is_tty: bool,
) -> bool {
    if no_color {
        return false;
    }
    if clicolor_force.is_some_and(|v| v != "0") {
        return true;
    }
    if clicolor == Some("0") {
        return false;
    }
    is_tty
}

pub fn lts_badge(is_lts: bool) -> ColoredString {
    if is_lts {
        "LTS".green().bold()
    } else {
        "   ".normal()
    }
}

/// `21.0.2+13-LTS  LTS  linux/x64  adoptium`
pub fn entry_line(entry: &ReleaseEntry) -> String {
    let platform = format!("{}/{}", entry.os, entry.arch);
    format!(
        "{} {} {:<16} {}",
        format!("{:<24}", entry.raw_version).bold(),
        lts_badge(entry.is_lts),
        platform,
        entry.provider.to_string().dimmed()
    )
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
