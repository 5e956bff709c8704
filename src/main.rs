//! Binary entrypoint for the `teampulse` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match teampulse::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
