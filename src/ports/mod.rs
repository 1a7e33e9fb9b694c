//! Port traits (interfaces) for the outer surfaces of the simulator.

pub mod config_port;
pub mod trade_source;
pub mod report_port;
