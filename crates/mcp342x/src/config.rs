//! Configuration fields and the packing of them into the MCP342x configuration byte.

use core::time::Duration;

use crate::InvalidConfiguration;

/// Member of the MCP342x family attached to the bus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// Single channel, fixed address.
    Mcp3421,
    /// Two channels.
    Mcp3422,
    /// Two channels.
    Mcp3423,
    /// Four channels.
    #[default]
    Mcp3424,
}

impl Model {
    /// Number of input channels on this part.
    pub fn channels(&self) -> u8 {
        match self {
            Model::Mcp3421 => 1,
            Model::Mcp3422 | Model::Mcp3423 => 2,
            Model::Mcp3424 => 4,
        }
    }

    /// Check a 1-based channel number against this part and convert it to a [`Channel`].
    pub fn channel(&self, channel: u8) -> Result<Channel, InvalidConfiguration> {
        if channel > self.channels() {
            return Err(InvalidConfiguration::Channel(channel));
        }

        Channel::try_from(channel)
    }
}

/// Conversion triggering policy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Convert once when configured, then idle.
    OneShot,
    /// Convert repeatedly at the rate set by the resolution.
    #[default]
    Continuous,
}

impl Mode {
    fn bits(&self) -> u8 {
        match self {
            Mode::Continuous => 0b0000_0000,
            Mode::OneShot => 0b0001_0000,
        }
    }
}

/// Input channel, numbered from 1 as printed in the datasheet.
#[allow(missing_docs)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    #[default]
    CH1 = 1,
    CH2 = 2,
    CH3 = 3,
    CH4 = 4,
}

impl Channel {
    /// Iterate over all channels.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::CH1, Self::CH2, Self::CH3, Self::CH4].into_iter()
    }

    fn bits(&self) -> u8 {
        match self {
            Channel::CH1 => 0b000_0000,
            Channel::CH2 => 0b010_0000,
            Channel::CH3 => 0b100_0000,
            Channel::CH4 => 0b110_0000,
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = InvalidConfiguration;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::CH1),
            2 => Ok(Self::CH2),
            3 => Ok(Self::CH3),
            4 => Ok(Self::CH4),
            other => Err(InvalidConfiguration::Channel(other)),
        }
    }
}

/// Sample resolution. Higher resolutions convert more slowly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 12 bits, 240 samples per second
    #[default]
    Bits12,
    /// 14 bits, 60 samples per second
    Bits14,
    /// 16 bits, 15 samples per second
    Bits16,
    /// 18 bits, 3.75 samples per second
    Bits18,
}

impl Resolution {
    /// Resolution in bits.
    pub fn bits(&self) -> u8 {
        match self {
            Resolution::Bits12 => 12,
            Resolution::Bits14 => 14,
            Resolution::Bits16 => 16,
            Resolution::Bits18 => 18,
        }
    }

    /// Number of sample bytes the chip returns ahead of the configuration byte.
    pub fn sample_width(&self) -> usize {
        match self {
            Resolution::Bits18 => 3,
            _ => 2,
        }
    }

    /// Voltage of one LSB in microvolts, before the PGA gain is taken into account.
    pub fn lsb_microvolts(&self) -> f64 {
        match self {
            Resolution::Bits12 => 1000.0,
            Resolution::Bits14 => 250.0,
            Resolution::Bits16 => 62.5,
            Resolution::Bits18 => 15.625,
        }
    }

    /// Conversion rate of the chip at this resolution.
    pub fn samples_per_second(&self) -> f32 {
        match self {
            Resolution::Bits12 => 240.0,
            Resolution::Bits14 => 60.0,
            Resolution::Bits16 => 15.0,
            Resolution::Bits18 => 3.75,
        }
    }

    /// Time taken by a single conversion as a [`Duration`].
    ///
    /// The driver never waits on its own; callers should allow this long after
    /// reconfiguring before expecting a fresh conversion.
    pub fn conversion_time(&self) -> Duration {
        match self {
            Resolution::Bits12 => Duration::from_nanos(4_166_667),
            Resolution::Bits14 => Duration::from_nanos(16_666_667),
            Resolution::Bits16 => Duration::from_nanos(66_666_667),
            Resolution::Bits18 => Duration::from_nanos(266_666_667),
        }
    }

    fn config_bits(&self) -> u8 {
        match self {
            Resolution::Bits12 => 0b0000,
            Resolution::Bits14 => 0b0100,
            Resolution::Bits16 => 0b1000,
            Resolution::Bits18 => 0b1100,
        }
    }
}

impl TryFrom<u8> for Resolution {
    type Error = InvalidConfiguration;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(Self::Bits12),
            14 => Ok(Self::Bits14),
            16 => Ok(Self::Bits16),
            18 => Ok(Self::Bits18),
            other => Err(InvalidConfiguration::Resolution(other)),
        }
    }
}

/// Programmable gain amplifier setting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    #[default]
    X1,
    X2,
    X4,
    X8,
}

impl Gain {
    /// Gain as a multiplier.
    pub fn factor(&self) -> u8 {
        match self {
            Gain::X1 => 1,
            Gain::X2 => 2,
            Gain::X4 => 4,
            Gain::X8 => 8,
        }
    }

    fn bits(&self) -> u8 {
        match self {
            Gain::X1 => 0b00,
            Gain::X2 => 0b01,
            Gain::X4 => 0b10,
            Gain::X8 => 0b11,
        }
    }
}

impl TryFrom<u8> for Gain {
    type Error = InvalidConfiguration;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            4 => Ok(Self::X4),
            8 => Ok(Self::X8),
            other => Err(InvalidConfiguration::Gain(other)),
        }
    }
}

/// Settings held by the driver and written to the chip as one byte.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub channel: Channel,
    pub resolution: Resolution,
    pub gain: Gain,
}

impl Config {
    /// Pack the settings into the configuration byte.
    pub fn to_byte(&self) -> u8 {
        self.mode.bits() | self.channel.bits() | self.resolution.config_bits() | self.gain.bits()
    }

    /// Scale a raw conversion code to millivolts using the current resolution and gain.
    pub fn to_millivolts(&self, code: i32) -> f64 {
        code as f64 * self.resolution.lsb_microvolts() / self.gain.factor() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_zero() {
        let config = Config::default();

        assert_eq!(config.mode, Mode::Continuous);
        assert_eq!(config.channel, Channel::CH1);
        assert_eq!(config.resolution, Resolution::Bits12);
        assert_eq!(config.gain, Gain::X1);
        assert_eq!(config.to_byte(), 0x00);
    }

    #[test]
    fn packs_fields_into_disjoint_bits() {
        let config = Config {
            mode: Mode::OneShot,
            channel: Channel::CH3,
            resolution: Resolution::Bits16,
            gain: Gain::X4,
        };

        assert_eq!(config.to_byte(), 0b0101_1010);

        let config = Config {
            mode: Mode::OneShot,
            channel: Channel::CH4,
            resolution: Resolution::Bits18,
            gain: Gain::X8,
        };

        assert_eq!(config.to_byte(), 0b0111_1111);
    }

    #[test]
    fn every_combination_is_the_or_of_its_fields() {
        for mode in [Mode::Continuous, Mode::OneShot] {
            for channel in Channel::all() {
                for bits in [12u8, 14, 16, 18] {
                    for gain in [1u8, 2, 4, 8] {
                        let resolution = Resolution::try_from(bits).unwrap();
                        let gain = Gain::try_from(gain).unwrap();
                        let config = Config {
                            mode,
                            channel,
                            resolution,
                            gain,
                        };

                        let expected = ((mode == Mode::OneShot) as u8) << 4
                            | (channel as u8 - 1) << 5
                            | (bits - 12) / 2 << 2
                            | gain.factor().trailing_zeros() as u8;

                        assert_eq!(config.to_byte(), expected, "{config:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn rejects_unsupported_values() {
        assert_eq!(Channel::try_from(0), Err(InvalidConfiguration::Channel(0)));
        assert_eq!(Channel::try_from(5), Err(InvalidConfiguration::Channel(5)));
        assert_eq!(Resolution::try_from(10), Err(InvalidConfiguration::Resolution(10)));
        assert_eq!(Resolution::try_from(24), Err(InvalidConfiguration::Resolution(24)));
        assert_eq!(Gain::try_from(0), Err(InvalidConfiguration::Gain(0)));
        assert_eq!(Gain::try_from(3), Err(InvalidConfiguration::Gain(3)));
    }

    #[test]
    fn channel_set_depends_on_model() {
        assert_eq!(Model::Mcp3421.channel(1), Ok(Channel::CH1));
        assert_eq!(Model::Mcp3421.channel(2), Err(InvalidConfiguration::Channel(2)));
        assert_eq!(Model::Mcp3422.channel(2), Ok(Channel::CH2));
        assert_eq!(Model::Mcp3423.channel(3), Err(InvalidConfiguration::Channel(3)));
        assert_eq!(Model::Mcp3424.channel(4), Ok(Channel::CH4));
        assert_eq!(Model::Mcp3424.channel(0), Err(InvalidConfiguration::Channel(0)));
    }

    #[test]
    fn scales_codes_to_millivolts() {
        let config = Config::default();
        assert_eq!(config.to_millivolts(100), 100.0);

        let config = Config {
            resolution: Resolution::Bits18,
            gain: Gain::X2,
            ..Config::default()
        };
        assert_eq!(config.to_millivolts(-200), -1.5625);
    }

    #[test]
    fn conversion_time_matches_rate() {
        for resolution in [
            Resolution::Bits12,
            Resolution::Bits14,
            Resolution::Bits16,
            Resolution::Bits18,
        ] {
            let period = 1.0 / resolution.samples_per_second() as f64;
            let error = (resolution.conversion_time().as_secs_f64() - period).abs();
            assert!(error < 1e-6, "{resolution:?}");
        }
    }
}
