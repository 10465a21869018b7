//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for teleop using clap's derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::StaticConfig;

/// teleop - drive a serial-connected robot with W/A/S/D
#[derive(Parser, Debug)]
#[command(name = "teleop")]
#[command(version)]
#[command(about = "Drive a serial-connected robot from the keyboard", long_about = None)]
pub struct Cli {
    /// Configuration file (default: teleop.toml, optional)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the teleop loop (default)
    Run(RunArgs),

    /// List serial ports available on this machine
    Ports,

    /// Show the key bindings and their payloads
    Keys,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Overrides applied on top of the loaded configuration
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Serial device (e.g. COM6, /dev/ttyUSB0)
    #[arg(long, short = 'p')]
    pub port: Option<String>,

    /// Baud rate
    #[arg(long, short = 'b')]
    pub baud_rate: Option<u32>,

    /// Delay after each sent command, in milliseconds
    #[arg(long)]
    pub poll_delay_ms: Option<u64>,

    /// Wait after opening the port before sending, in milliseconds
    #[arg(long)]
    pub init_delay_ms: Option<u64>,
}

impl RunArgs {
    pub fn apply(&self, config: &mut StaticConfig) {
        if let Some(port) = &self.port {
            config.serial.port = port.clone();
        }
        if let Some(baud_rate) = self.baud_rate {
            config.serial.baud_rate = baud_rate;
        }
        if let Some(poll_delay_ms) = self.poll_delay_ms {
            config.timing.poll_delay_ms = poll_delay_ms;
        }
        if let Some(init_delay_ms) = self.init_delay_ms {
            config.timing.init_delay_ms = init_delay_ms;
        }
    }
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: teleop.example.toml)
        output_path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
