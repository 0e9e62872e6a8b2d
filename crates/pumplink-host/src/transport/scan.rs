//! Port enumeration
//!
//! Supplies the list of candidate ports the operator can choose from before
//! opening a session.

use serialport::SerialPortType;

use super::ConnectionError;

/// One discoverable serial port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub name: String,
    pub description: String,
}

/// Enumerate the serial ports visible to the host, sorted by name.
pub fn available_ports() -> Result<Vec<PortInfo>, ConnectionError> {
    let mut ports: Vec<PortInfo> = serialport::available_ports()
        .map_err(|e| ConnectionError::Scan(e.to_string()))?
        .into_iter()
        .map(|p| PortInfo {
            name: p.port_name,
            description: describe(&p.port_type),
        })
        .collect();
    ports.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(ports)
}

fn describe(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let mut description = format!("USB {:04x}:{:04x}", usb.vid, usb.pid);
            if let Some(product) = &usb.product {
                description.push(' ');
                description.push_str(product);
            }
            description
        }
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "Unknown".to_string(),
    }
}
