use time::macros::format_description;
use tracing::error;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so stdout carries only the report. `RUST_LOG`
/// overrides the default `error` level.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Emits a failed run through the log subscriber, which is the only place it
/// is written.
pub fn report_failure(err: &anyhow::Error) {
    error!("Error: {:#}", err);
}
