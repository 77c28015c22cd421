use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::Rotation;

/// Sends logs to a daily rolling file; the terminal belongs to the UI.
pub fn enable_logging(log_dir: &Path, level: &str) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix("stt")
        .build(log_dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
        )))
        .with_ansi(false)
        .with_writer(appender)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;
    Ok(())
}
