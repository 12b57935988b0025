use embedded_hal::i2c::I2c;

use crate::config::{Config, Mode, Model};
use crate::{decode, Error, Gain, Resolution};

/// A conversion as returned by the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    code: i32,
    status: u8,
}

impl Sample {
    /// Sign-extended output code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Configuration byte the chip sends after the output code.
    pub fn status(&self) -> u8 {
        self.status
    }
}

/// MCP342x driver
pub struct Mcp342x<I2C> {
    i2c: I2C,
    address: u8,
    model: Model,
    config: Config,
}

impl<I2C: I2c> Mcp342x<I2C> {
    /// Creates a new driver for a four channel MCP3424 at `address`.
    /// Nothing is sent to the chip until the configuration is written.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::with_model(i2c, address, Model::Mcp3424)
    }

    /// Creates a new driver for a specific member of the family.
    pub fn with_model(i2c: I2C, address: u8, model: Model) -> Self {
        Mcp342x {
            i2c,
            address,
            model,
            config: Config::default(),
        }
    }

    /// 7-bit I²C address of the chip.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Configuration held by the driver. This may be ahead of the chip if it hasn't been written yet.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Release the I²C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write the current configuration byte to the chip.
    pub fn write_config(&mut self) -> Result<(), Error<I2C::Error>> {
        let config = self.config.to_byte();

        log::debug!(
            "MCP342x at {:#04x}: writing config {:#010b}",
            self.address,
            config
        );

        self.i2c
            .write(self.address, &[config])
            .map_err(Error::Transport)
    }

    /// Set the conversion mode. If `configure_now` is `true` the configuration is written immediately.
    pub fn set_mode(&mut self, mode: Mode, configure_now: bool) -> Result<(), Error<I2C::Error>> {
        self.config.mode = mode;

        self.apply(configure_now)
    }

    /// Select the input channel, numbered from 1.
    /// If `configure_now` is `true` the configuration is written immediately.
    pub fn set_channel(&mut self, channel: u8, configure_now: bool) -> Result<(), Error<I2C::Error>> {
        self.config.channel = self.model.channel(channel)?;

        self.apply(configure_now)
    }

    /// Set the resolution in bits (12, 14, 16 or 18).
    /// If `configure_now` is `true` the configuration is written immediately.
    pub fn set_resolution(
        &mut self,
        resolution: u8,
        configure_now: bool,
    ) -> Result<(), Error<I2C::Error>> {
        self.config.resolution = Resolution::try_from(resolution)?;

        self.apply(configure_now)
    }

    /// Set the PGA gain (1, 2, 4 or 8).
    /// If `configure_now` is `true` the configuration is written immediately.
    pub fn set_gain(&mut self, gain: u8, configure_now: bool) -> Result<(), Error<I2C::Error>> {
        self.config.gain = Gain::try_from(gain)?;

        self.apply(configure_now)
    }

    /// Read the latest conversion held by the chip.
    ///
    /// In continuous mode this is the value converted within the last conversion period, in
    /// one-shot mode the value converted after the configuration was last written.
    pub fn read_sample(&mut self) -> Result<Sample, Error<I2C::Error>> {
        let width = self.config.resolution.sample_width();

        // Up to 3 sample bytes followed by the configuration byte
        let mut buffer = [0; 4];
        let buffer = &mut buffer[..width + 1];

        self.i2c
            .read(self.address, buffer)
            .map_err(Error::Transport)?;

        let sample = Sample {
            code: decode(&buffer[..width]),
            status: buffer[width],
        };

        log::trace!(
            "MCP342x at {:#04x}: read {:02x?} -> {}",
            self.address,
            buffer,
            sample.code
        );

        Ok(sample)
    }

    /// Read the latest conversion and scale it to millivolts.
    pub fn read(&mut self) -> Result<f64, Error<I2C::Error>> {
        let sample = self.read_sample()?;

        Ok(self.config.to_millivolts(sample.code))
    }

    fn apply(&mut self, configure_now: bool) -> Result<(), Error<I2C::Error>> {
        if configure_now {
            self.write_config()
        } else {
            Ok(())
        }
    }
}
