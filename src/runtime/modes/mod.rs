//! Mode routing
//!
//! This module provides unified entry points for the subcommands:
//! - Run mode (teleop loop, default)
//! - Ports (serial port listing)
//! - Keys (key binding table)
//! - Config (sample config generation)

pub mod config;
pub mod keys;
pub mod ports;
pub mod teleop;

use std::process::ExitCode;

use crate::cli::{Cli, Commands, ConfigCommands, RunArgs};

/// Dispatch the parsed command line
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        None => teleop::run_teleop(cli.config.as_deref(), &RunArgs::default()),
        Some(Commands::Run(args)) => teleop::run_teleop(cli.config.as_deref(), &args),
        Some(Commands::Ports) => {
            ports::list_ports()?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Keys) => {
            keys::show_keys();
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        }) => {
            config::config_generate(output_path, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
