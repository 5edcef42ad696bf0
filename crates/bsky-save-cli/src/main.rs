use bsky_save_core::logging;
use tokio::task::LocalSet;

mod cli;

use crate::cli::CliCommand;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging as early as possible.
    logging::init();

    // Page work (DOM, downloads) is single-threaded and runs on a LocalSet.
    let local = LocalSet::new();
    if let Err(err) = local.run_until(CliCommand::run_from_args()).await {
        eprintln!("bsky-save error: {:#}", err);
        std::process::exit(1);
    }
}
