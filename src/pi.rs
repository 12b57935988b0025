use std::cell::RefCell;
use std::time::Duration;

use clap::Parser;
use embedded_hal_bus::i2c::RefCellDevice;
use log::info;
use mcp342x::Mcp342x;
use mcp342x_pi::cli::Args;
use mcp342x_pi::sampler::{Sampler, Sleep};
use rppal::i2c::I2c;
use simplelog::{Config, SimpleLogger};

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    SimpleLogger::init(args.log_level, Config::default())?;

    let i2c = RefCell::new(I2c::with_bus(args.bus)?);

    // Every chip shares the one bus, so transactions are serialised through the RefCell
    let adcs = args
        .addresses
        .iter()
        .map(|&address| Mcp342x::with_model(RefCellDevice::new(&i2c), address, args.model.into()))
        .collect();

    let mut sampler = Sampler::new(adcs, args.channels.clone(), Sleep);

    sampler.configure(args.mode(), args.resolution, args.gain)?;

    info!(
        "Sampling {} chip(s) on /dev/i2c-{} at {} bits, gain x{}",
        args.addresses.len(),
        args.bus,
        args.resolution,
        args.gain
    );

    let mut rounds = 0;

    loop {
        for reading in sampler.round()? {
            info!(
                "{:#04x} channel {}: {:.4} mV",
                reading.address, reading.channel, reading.millivolts
            );
        }

        rounds += 1;

        if args.count != 0 && rounds >= args.count {
            break;
        }

        std::thread::sleep(Duration::from_millis(args.interval_ms));
    }

    Ok(())
}
