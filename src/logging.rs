//! File logging setup.

use std::fs::File;

use color_eyre::eyre::{Result, WrapErr as _};
use log::info;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::Config;

/// Installs the global logger described by `config`.
///
/// Logging goes to the file named by [`Config::log_file`]; without one this does nothing and every
/// log macro in the crate stays silent.
///
/// # Errors
///
/// This function may return errors if:
/// - The log file cannot be created
/// - A global logger is already installed
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let log_config = ConfigBuilder::new().set_thread_level(log::LevelFilter::Off).build();

    WriteLogger::init(config.log_level, log_config, file)?;
    info!("logging to {} at {}", path.display(), config.log_level);

    Ok(())
}
