use tracing::metadata::LevelFilter;
use tracing_subscriber::{fmt, prelude::*};

/// Routes `log` records through a stderr `fmt` layer at `INFO`.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_log() -> Result<(), tracing_subscriber::util::TryInitError> {
    let stderr_log = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry().with(stderr_log).try_init()
}
