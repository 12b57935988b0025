//! Provides a driver for the Microchip MCP3421/3422/3423/3424 delta-sigma ADCs via the `embedded-hal` ecosystem.
//!
//! The chips are configured by writing a single byte over I²C and report a conversion as a
//! big-endian two's-complement code followed by an echo of that configuration byte.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

use core::fmt;

pub mod config;
pub mod mcp342x;

pub use config::{Channel, Config, Gain, Mode, Model, Resolution};
pub use mcp342x::{Mcp342x, Sample};

/// Address of a part with both address pins tied low (or an MCP3421 with no address pins).
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// A configuration value outside of what the chip supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfiguration {
    /// Channel number not present on the configured [`Model`].
    Channel(u8),
    /// Resolution in bits other than 12, 14, 16 or 18.
    Resolution(u8),
    /// PGA gain other than 1, 2, 4 or 8.
    Gain(u8),
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(channel) => write!(f, "unsupported channel {channel}"),
            Self::Resolution(bits) => write!(f, "unsupported resolution of {bits} bits"),
            Self::Gain(gain) => write!(f, "unsupported gain x{gain}"),
        }
    }
}

impl core::error::Error for InvalidConfiguration {}

/// Errors raised by [`Mcp342x`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Rejected before touching the bus; the driver state is unchanged.
    InvalidConfiguration(InvalidConfiguration),
    /// The underlying I²C operation failed.
    Transport(E),
}

impl<E> From<InvalidConfiguration> for Error<E> {
    fn from(error: InvalidConfiguration) -> Self {
        Self::InvalidConfiguration(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(error) => write!(f, "invalid configuration: {error}"),
            Self::Transport(error) => write!(f, "i2c transport error: {error:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// Internal method for decoding the sample bytes of a conversion. `bytes` must be 2 or 3 bytes long.
pub(crate) fn decode(bytes: &[u8]) -> i32 {
    let sign = if bytes[0] & 0b1000_0000 != 0 {
        0xFF
    } else {
        0x00
    };

    match *bytes {
        [high, low] => i16::from_be_bytes([high, low]) as i32,
        [upper, high, low] => i32::from_be_bytes([sign, upper, high, low]),
        _ => unreachable!("MCP342x samples are 2 or 3 bytes"),
    }
}
