use meshgrab_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log file first; stderr if the state directory is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("meshgrab error: {:#}", err);
        std::process::exit(1);
    }
}
