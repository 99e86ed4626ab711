//! mazecast - Command-line tool for rendering maze-chase demo media

use std::process::ExitCode;

use mazecast::cli;

fn main() -> ExitCode {
    cli::run()
}
