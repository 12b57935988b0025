//! Command line sampling of MCP342x ADCs on a shared I²C bus.

pub mod cli;
pub mod sampler;
