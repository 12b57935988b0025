use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use mcp342x::{Error, Mcp342x, Mode};

/// A single conversion from one channel of one chip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub address: u8,
    pub channel: u8,
    pub millivolts: f64,
}

/// [`DelayNs`] backed by [`std::thread::sleep`].
pub struct Sleep;

impl DelayNs for Sleep {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }
}

/// Cycles through a list of channels on each of several ADCs sharing a bus.
pub struct Sampler<I2C, D> {
    adcs: Vec<Mcp342x<I2C>>,
    channels: Vec<u8>,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> Sampler<I2C, D> {
    pub fn new(adcs: Vec<Mcp342x<I2C>>, channels: Vec<u8>, delay: D) -> Self {
        Self {
            adcs,
            channels,
            delay,
        }
    }

    /// Apply settings shared by every chip and check each channel against each chip's model.
    /// Nothing is written until the first round selects a channel.
    pub fn configure(
        &mut self,
        mode: Mode,
        resolution: u8,
        gain: u8,
    ) -> Result<(), Error<I2C::Error>> {
        for adc in &mut self.adcs {
            adc.set_mode(mode, false)?;
            adc.set_resolution(resolution, false)?;
            adc.set_gain(gain, false)?;

            for &channel in &self.channels {
                adc.set_channel(channel, false)?;
            }
        }

        Ok(())
    }

    /// Select each channel in turn, wait out a conversion, and read it back.
    pub fn round(&mut self) -> Result<Vec<Reading>, Error<I2C::Error>> {
        let mut readings = Vec::with_capacity(self.adcs.len() * self.channels.len());

        for adc in &mut self.adcs {
            for &channel in &self.channels {
                adc.set_channel(channel, true)?;

                let wait = adc.config().resolution.conversion_time();
                self.delay.delay_us(wait.as_micros() as u32);

                let millivolts = adc.read()?;

                log::debug!(
                    "{:#04x} channel {channel}: {millivolts} mV",
                    adc.address()
                );

                readings.push(Reading {
                    address: adc.address(),
                    channel,
                    millivolts,
                });
            }
        }

        Ok(readings)
    }
}
