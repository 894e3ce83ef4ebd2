use acquire_core::{logging, net};

mod cli;

use crate::cli::CliCommand;

fn main() {
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }
    net::global_init();

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("oscap-acquire error: {:#}", err);
        std::process::exit(1);
    }
}
