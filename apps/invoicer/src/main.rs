//! Binary entry point for the Sunar invoicer.
//!
//! Thin shell: all behavior lives in the library crate.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match invoicer::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
