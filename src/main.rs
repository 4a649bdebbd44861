use anyhow::Result;
use clap::Parser;

use weblog_stats::{utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging();

    let stdout = std::io::stdout();
    match weblog_stats::run(&args.url, &mut stdout.lock()) {
        Ok(()) => Ok(()),
        Err(e) => {
            utils::report_failure(&e);
            std::process::exit(1);
        }
    }
}
