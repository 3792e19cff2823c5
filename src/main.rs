//! memory-builder CLI entry point
//!
//! Parses arguments, runs the requested command, and renders any error with
//! suggestions before exiting with status 1.

use clap::Parser;
use memory_builder::cli;
use memory_builder::core::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
