//! Generate config command

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::config::StaticConfig;
use crate::errors::{Result, TeleopError};

pub const DEFAULT_SAMPLE_PATH: &str = "teleop.example.toml";

/// Write a sample configuration with every default spelled out
pub fn config_generate(output_path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = output_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_PATH));
    write_sample_config(&path, force)?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.display().to_string().blue()
    );
    println!(
        "  {}",
        "Key bindings are fixed and not part of the configuration".dimmed()
    );
    Ok(())
}

/// Refuses to overwrite an existing file unless `force` is set
pub fn write_sample_config(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        return Err(TeleopError::file_operation(format!(
            "{} already exists, use --force to overwrite",
            path.display()
        )));
    }
    StaticConfig::default().save_to_file(path)
}
