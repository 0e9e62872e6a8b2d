//! Command implementations for pumplink

mod ports;
mod provision;

pub use ports::ports;
pub use provision::provision;
