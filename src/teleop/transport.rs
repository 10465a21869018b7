//! Serial connection handling
//!
//! A connection is opened once per session and released by `Drop`, so every
//! exit path of the loop closes it exactly once.

use std::io::Write;

use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use tracing::{debug, info, warn};

use crate::config::SerialConfig;
use crate::errors::{Result, TeleopError};

/// An open, exclusively owned link to the robot
pub trait Transport {
    fn send(&mut self, payload: &[u8]) -> Result<()>;
}

/// Opens a [`Transport`] from serial settings
pub trait Connector {
    type Link: Transport;

    fn open(&self, settings: &SerialConfig) -> Result<Self::Link>;
}

/// Connector for real serial devices
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialConnector;

impl Connector for SerialConnector {
    type Link = SerialLink;

    fn open(&self, settings: &SerialConfig) -> Result<SerialLink> {
        let port = serialport::new(&settings.port, settings.baud_rate)
            .timeout(settings.read_timeout())
            .data_bits(DataBits::Eight)
            .stop_bits(StopBits::One)
            .parity(Parity::None)
            .flow_control(FlowControl::None)
            .open()
            .map_err(|e| {
                TeleopError::connection(format!("Failed to open {}: {}", settings.port, e))
            })?;

        info!(
            "Serial port {} opened at {} baud",
            settings.port, settings.baud_rate
        );
        Ok(SerialLink {
            port,
            name: settings.port.clone(),
        })
    }
}

pub struct SerialLink {
    port: Box<dyn SerialPort>,
    name: String,
}

impl Transport for SerialLink {
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.port
            .write_all(payload)
            .and_then(|_| self.port.flush())
            .map_err(|e| TeleopError::transport(format!("Write to {} failed: {}", self.name, e)))
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        if let Err(e) = self.port.flush() {
            warn!("Flush before closing {} failed: {}", self.name, e);
        }
        // 端口句柄随 Box 释放而关闭
        info!("Serial port {} closed", self.name);
    }
}

/// Serial port discovered on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSummary {
    pub name: String,
    pub kind: String,
}

/// List serial ports visible to the OS
pub fn available_ports() -> Result<Vec<PortSummary>> {
    let ports = serialport::available_ports()
        .map_err(|e| TeleopError::connection(format!("Failed to enumerate ports: {}", e)))?;
    debug!("Found {} serial ports", ports.len());

    Ok(ports
        .into_iter()
        .map(|p| PortSummary {
            name: p.port_name,
            kind: describe_port_type(&p.port_type),
        })
        .collect())
}

fn describe_port_type(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let product = usb.product.as_deref().unwrap_or("USB serial");
            format!("{} ({:04x}:{:04x})", product, usb.vid, usb.pid)
        }
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "Unknown".to_string(),
    }
}
