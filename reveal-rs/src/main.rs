use reveal_core::prelude::*;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `REVEAL_LOG=debug`.
const LOG_ENV: &str = "REVEAL_LOG";

fn init_logging() {
    // Diagnostics share stderr with the logs, so stay silent unless asked.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run() -> i32 {
    init_logging();
    let batch = Batch::new(RealFileSystem, SystemIdentity);
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let status = batch.run(env::args_os().skip(1), &mut stdout, io::stderr());
    tracing::debug!(?status, "batch finished");
    i32::from(status.as_code())
}

fn main() {
    std::process::exit(run());
}
