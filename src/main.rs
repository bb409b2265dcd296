use std::process;

use clap::Parser;
use maestro_serial_servo::{
    hardware::{Channel, PulseWidth},
    serial,
    servo::Servo,
};

/// Move one servo channel on a Pololu Maestro to a pulse width.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Servo channel, 0 to 11.
    channel: u8,
    /// Pulse width in microseconds, 250 to 2500.
    pulse_width_us: u16,
    /// Serial device of the Maestro command port.
    #[arg(long, default_value = "/dev/ttyACM0")]
    port: String,
    /// Baud rate of the command port.
    #[arg(long, default_value_t = serial::BAUD_RATE)]
    baud_rate: u32,
}

fn main() {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            process::exit(1);
        }
    };

    if let Err(error) = run(&args) {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let channel = Channel::new(args.channel)?;
    let width = PulseWidth::from_microseconds(args.pulse_width_us)?;

    let mut port = serial::open(&args.port, args.baud_rate)?;

    println!(
        "Moving servo {} to {} us...",
        channel.value(),
        width.microseconds()
    );
    Servo::new(channel).set_target(width, &mut port)?;
    println!(
        "Servo {} moved to {} us",
        channel.value(),
        width.microseconds()
    );

    Ok(())
}
