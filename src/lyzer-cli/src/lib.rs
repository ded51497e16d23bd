//! Lyzer CLI library.
//!
//! - `cli` - argument parsing and dispatch
//! - `setup` - first-run config creation
//! - `update_cmd` - forced and automatic update checks
//! - `load_cmd` - schedule loading
//! - `table` - schedule rendering
//! - `styled_output` - colored console messages

pub mod cli;
pub mod load_cmd;
pub mod setup;
pub mod styled_output;
pub mod table;
pub mod update_cmd;

pub use cli::{Cli, Commands, dispatch_command};
