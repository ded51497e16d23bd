//! CLI styling and formatting.
//!
//! Defines ANSI colors and formatting for the CLI help output.

use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Help theme for the `lyzer` binary.
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

/// After-help section with usage examples and paths.
pub const AFTER_HELP: &str = color_print::cstr!(
    r#"<cyan,bold>QUICK START</>
    <green,bold>lyzer load schedule</> <dim>--year 2024</>   Load a season's race schedule
    <green,bold>lyzer update</>                      Check for a newer release now
    <green,bold>lyzer version</>                     Print the installed version

<cyan,bold>ENVIRONMENT VARIABLES</>
    <yellow>LYZER_HOME</>           Override config directory (default: ~/.lyzer)
    <yellow>LYZER_LOG_LEVEL</>      Log verbosity (error, warn, info, debug, trace)
    <yellow>NO_COLOR</>             Disable colored output (set to '1' or 'true')

<cyan,bold>PATHS</>
    <dim>Config</>      ~/.lyzer/config.json
    <dim>Updates</>     ~/lyzer (downloaded release)"#
);
