use colored::Colorize;

use crate::errors::Result;
use crate::teleop::available_ports;

/// Print serial ports visible to the OS
pub fn list_ports() -> Result<()> {
    let ports = available_ports()?;
    if ports.is_empty() {
        println!("{}", "No serial ports found".yellow());
        return Ok(());
    }

    for port in &ports {
        println!("  {}  {}", port.name.cyan(), port.kind.dimmed());
    }
    println!("{} {}", ports.len().to_string().bold(), "port(s) found".green());
    Ok(())
}
