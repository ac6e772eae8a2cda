//! MarketLens CLI
//!
//! `marketlens` (interactive console), `marketlens report <industry>` and
//! `marketlens check-key`. Logs go to `--log-dir`; see `--help`.

use clap::Parser;
use marketlens::cli::{run_cli_mode, Args};
use marketlens::logging;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let guard = logging::init(&args.log_dir, args.verbose)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "marketlens starting");

    let exit_code = run_cli_mode(args);

    // Flush buffered log lines; process::exit skips destructors
    drop(guard);
    std::process::exit(exit_code);
}
