use std::error::Error;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the diagnostics subscriber. Output is appended to the
/// configured log file; the raw-mode terminal surface is never written to.
/// When no file is configured, diagnostics are discarded.
pub fn init_tracing(log_file: Option<&str>) -> Result<(), Box<dyn Error>> {
    let path = match log_file {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("causette=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
