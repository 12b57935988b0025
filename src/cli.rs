use clap::{Parser, ValueEnum};
use log::LevelFilter;
use mcp342x::{Mode, Model};

/// Periodically sample MCP342x ADCs on the Raspberry Pi's I²C bus.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// I²C bus number, as in /dev/i2c-N
    #[arg(long, default_value_t = 1)]
    pub bus: u8,

    /// 7-bit address of an ADC, in hex (0x68) or decimal. Repeat for several chips on the same bus.
    #[arg(short, long = "address", value_parser = parse_address, default_values_t = [mcp342x::DEFAULT_ADDRESS])]
    pub addresses: Vec<u8>,

    #[arg(long, value_enum, default_value_t = ModelArg::Mcp3424)]
    pub model: ModelArg,

    /// Channel to sample, numbered from 1. Repeat to sample several channels in turn.
    #[arg(short, long = "channel", default_values_t = [1])]
    pub channels: Vec<u8>,

    /// Resolution in bits: 12, 14, 16 or 18
    #[arg(short, long, default_value_t = 12)]
    pub resolution: u8,

    /// PGA gain: 1, 2, 4 or 8
    #[arg(short, long, default_value_t = 1)]
    pub gain: u8,

    /// Use one-shot conversions instead of continuous mode
    #[arg(long)]
    pub one_shot: bool,

    /// Pause between sampling rounds
    #[arg(long, default_value_t = 500)]
    pub interval_ms: u64,

    /// Number of rounds to sample, 0 to run until interrupted
    #[arg(long, default_value_t = 0)]
    pub count: u64,

    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.one_shot {
            Mode::OneShot
        } else {
            Mode::Continuous
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelArg {
    Mcp3421,
    Mcp3422,
    Mcp3423,
    Mcp3424,
}

impl From<ModelArg> for Model {
    fn from(model: ModelArg) -> Self {
        match model {
            ModelArg::Mcp3421 => Model::Mcp3421,
            ModelArg::Mcp3422 => Model::Mcp3422,
            ModelArg::Mcp3423 => Model::Mcp3423,
            ModelArg::Mcp3424 => Model::Mcp3424,
        }
    }
}

fn parse_address(value: &str) -> Result<u8, String> {
    let address = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    }
    .map_err(|error| format!("invalid address `{value}`: {error}"))?;

    if address > 0x7F {
        return Err(format!("address {address:#04x} does not fit in 7 bits"));
    }

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["pi"]).unwrap();

        assert_eq!(args.bus, 1);
        assert_eq!(args.addresses, vec![0x68]);
        assert_eq!(args.model, ModelArg::Mcp3424);
        assert_eq!(args.channels, vec![1]);
        assert_eq!(args.resolution, 12);
        assert_eq!(args.gain, 1);
        assert_eq!(args.mode(), Mode::Continuous);
        assert_eq!(args.count, 0);
        assert_eq!(args.log_level, LevelFilter::Info);
    }

    #[test]
    fn repeated_addresses_and_channels() {
        let args = Args::try_parse_from([
            "pi", "-a", "0x68", "-a", "105", "-c", "1", "-c", "4", "-r", "18", "-g", "8",
            "--one-shot", "--model", "mcp3422", "--log-level", "debug",
        ])
        .unwrap();

        assert_eq!(args.addresses, vec![0x68, 0x69]);
        assert_eq!(args.channels, vec![1, 4]);
        assert_eq!(args.resolution, 18);
        assert_eq!(args.gain, 8);
        assert_eq!(args.mode(), Mode::OneShot);
        assert_eq!(Model::from(args.model), Model::Mcp3422);
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn addresses() {
        assert_eq!(parse_address("0x6f"), Ok(0x6F));
        assert_eq!(parse_address("0X68"), Ok(0x68));
        assert_eq!(parse_address("104"), Ok(0x68));
        assert!(parse_address("0x80").is_err());
        assert!(parse_address("0xzz").is_err());
        assert!(parse_address("").is_err());
    }
}
