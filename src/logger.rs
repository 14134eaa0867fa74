//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("build"; "wrote {} pages", count);
//! log!("error"; "{:#}", err);
//! ```
//!
//! Messages are printed to stdout as `[module] message`. Single-line messages
//! are cut at the terminal width so a burst of build output stays one line per
//! event; multi-line messages (error chains) are printed as-is.

use colored::{ColoredString, Colorize};
use crossterm::terminal::size;
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Width assumed when the terminal cannot be queried (pipes, CI).
const FALLBACK_WIDTH: u16 = 120;

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(FALLBACK_WIDTH)) as usize
}

/// Print `[module] message`, truncating single-line messages to the terminal.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();

    if message.contains('\n') {
        writeln!(stdout, "{prefix} {message}").ok();
    } else {
        // "[" + module + "] "
        let prefix_len = module.len() + 3;
        let max_len = terminal_width().saturating_sub(prefix_len);
        writeln!(stdout, "{prefix} {}", truncate_str(message, max_len)).ok();
    }

    stdout.flush().ok();
}

/// Pick a prefix color by module name.
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" | "api" => prefix.bright_blue().bold(),
        "build" | "init" => prefix.bright_green().bold(),
        "warn" => prefix.yellow().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_cyan().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
