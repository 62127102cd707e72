//! hexpal - Command-line tool for hexagon palette containers

use std::process::ExitCode;

use hexpal::cli;

fn main() -> ExitCode {
    cli::run()
}
