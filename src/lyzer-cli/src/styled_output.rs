//! Styled console messages.
//!
//! Colors are only emitted when the target stream is a terminal and
//! `NO_COLOR` is unset (or set to `0`/`false`).

use std::io::{IsTerminal, Write};

/// Check if colors should be disabled based on NO_COLOR env var.
fn colors_disabled() -> bool {
    std::env::var("NO_COLOR")
        .map(|v| !v.is_empty() && v != "0" && v.to_lowercase() != "false")
        .unwrap_or(false)
}

fn use_colors(stderr: bool) -> bool {
    let is_terminal = if stderr {
        std::io::stderr().is_terminal()
    } else {
        std::io::stdout().is_terminal()
    };
    is_terminal && !colors_disabled()
}

const RESET: &str = "\x1b[0m";

/// Message type for styled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

impl MessageType {
    fn icon(&self) -> &'static str {
        match self {
            MessageType::Success => "[OK]",
            MessageType::Error => "[ERROR]",
            MessageType::Warning => "[WARN]",
            MessageType::Info => "[INFO]",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            MessageType::Success => "\x1b[32m",
            MessageType::Error => "\x1b[31m",
            MessageType::Warning => "\x1b[33m",
            MessageType::Info => "\x1b[34m",
        }
    }
}

/// Render a message with its icon, colored when `colored` is set.
fn render(msg_type: MessageType, message: &str, colored: bool) -> String {
    if colored {
        format!("{}{} {}{}", msg_type.color(), msg_type.icon(), message, RESET)
    } else {
        format!("{} {}", msg_type.icon(), message)
    }
}

fn print_styled(msg_type: MessageType, message: &str, to_stderr: bool) {
    let line = render(msg_type, message, use_colors(to_stderr));
    if to_stderr {
        let _ = writeln!(std::io::stderr(), "{line}");
    } else {
        let _ = writeln!(std::io::stdout(), "{line}");
    }
}

/// Print a success message to stdout.
pub fn print_success(message: &str) {
    print_styled(MessageType::Success, message, false);
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    print_styled(MessageType::Error, message, true);
}

/// Print a warning message to stderr.
pub fn print_warning(message: &str) {
    print_styled(MessageType::Warning, message, true);
}

/// Print an info message to stdout.
pub fn print_info(message: &str) {
    print_styled(MessageType::Info, message, false);
}
