//! Ports command - list candidate serial ports

use anyhow::{Context, Result};
use pumplink_host::transport::scan;

use crate::output::{OutputContext, PortRow};

/// List the serial ports the operator can open.
pub fn ports(ctx: &OutputContext) -> Result<()> {
    let ports = scan::available_ports().context("Failed to scan serial ports")?;

    let rows: Vec<PortRow> = ports
        .into_iter()
        .map(|p| PortRow {
            name: p.name,
            description: p.description,
        })
        .collect();

    ctx.print(&rows);
    Ok(())
}
