//! Logging bootstrap.
//!
//! The library logs through the `log` facade; the binary calls [`init`] once
//! to route records to stderr. `RUST_LOG` sets the level unless `--verbose`
//! asks for debug output.

use anyhow::Result;
use flexi_logger::{Logger, LoggerHandle};

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Start the stderr logger. Keep the returned handle alive for the life of
/// the process.
pub fn init(verbose: bool) -> Result<LoggerHandle> {
    let logger = if verbose {
        Logger::try_with_str(VERBOSE_LEVEL)?
    } else {
        Logger::try_with_env_or_str(DEFAULT_LEVEL)?
    };

    let handle = logger
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()?;
    Ok(handle)
}
