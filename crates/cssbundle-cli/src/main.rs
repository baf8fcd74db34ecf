//! cssbundle - compile the app stylesheet.
//!
//! Parses (the absence of) arguments, sets up logging, runs the build, and
//! maps the outcome to the process exit status.

use clap::Parser;
use cssbundle_cli::{cli, config, error, logger, ui};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let _args = cli::Cli::parse();

    ui::init_colors();
    logger::init_logger(config::LOG_LEVEL, !ui::colors_enabled());

    match cssbundle_cli::run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error::report(&err);
            ExitCode::from(1)
        }
    }
}
