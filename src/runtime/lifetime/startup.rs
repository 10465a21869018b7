//! Startup for the teleop session
//!
//! Order matters: configuration first (it decides where logs go), then the
//! logger, then the panic hook and the interrupt handler.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::RunArgs;
use crate::config::{StaticConfig, load_config};
use crate::system::{init_logging, install_interrupt_handler, install_panic_hook};
use crate::teleop::InterruptFlag;

pub struct StartupContext {
    pub config: StaticConfig,
    pub interrupt: InterruptFlag,
    /// Keeps the non-blocking log writer alive
    pub log_guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Load config, start logging, install process hooks
pub fn prepare_teleop_startup(config_path: Option<&Path>, args: &RunArgs) -> Result<StartupContext> {
    let config = load_config(config_path, |c| args.apply(c)).context("Failed to load configuration")?;

    let log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;
    install_panic_hook();
    let interrupt = install_interrupt_handler().context("Failed to install interrupt handler")?;

    info!(
        "teleop {} starting: port={} baud={}",
        env!("CARGO_PKG_VERSION"),
        config.serial.port,
        config.serial.baud_rate
    );
    debug!("Timing: {:?}", config.timing);

    Ok(StartupContext {
        config,
        interrupt,
        log_guard,
    })
}
