//! CLI-specific output implementations
//!
//! This module contains the terminal implementation of the dashboard view
//! and the plain-text formatters shared with the one-shot commands.

pub mod formatters;
pub mod terminal_view;

pub use terminal_view::TerminalView;

/// Print lines to stdout
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
