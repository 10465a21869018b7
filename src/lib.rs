//! teleop - keyboard teleoperation for serial-connected robots
//!
//! Polls W/A/S/D on the controlling terminal and writes a fixed ASCII
//! command line to the robot's serial port for every held key, until `q`
//! or Ctrl+C.
//!
//! # Architecture
//! - `teleop`: command table, key state, serial transport and the polling loop
//! - `config`: layered configuration (defaults, TOML, environment, CLI)
//! - `runtime`: subcommand routing and session lifecycle
//! - `system`: logging, panic hook and OS interrupt handling
//! - `cli`: clap command-line definitions

pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod system;
pub mod teleop;
