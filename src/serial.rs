use std::io::Write;
use std::time::Duration;

use log::debug;
use serialport::{DataBits, Parity, SerialPort, StopBits};
use thiserror::Error;

use crate::command::Command;

/// Baud rate of the Maestro command port in its default configuration.
pub const BAUD_RATE: u32 = 115_200;

const WRITE_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum SerialError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },
    #[error("Failed to configure port: {0}")]
    Config(#[source] serialport::Error),
    #[error("Failed to write command: {0}")]
    Write(#[source] std::io::Error),
    #[error("Short write, {written} of {expected} bytes.")]
    ShortWrite { written: usize, expected: usize },
}

/// Open the named device and apply the Maestro's line settings.
///
/// The returned handle owns the device exclusively and releases it on drop,
/// on every exit path.
pub fn open(path: &str, baud_rate: u32) -> Result<Box<dyn SerialPort>, SerialError> {
    let mut port = serialport::new(path, baud_rate)
        .timeout(WRITE_TIMEOUT)
        .open()
        .map_err(|source| SerialError::Open {
            path: path.into(),
            source,
        })?;

    configure(&mut port, baud_rate)?;

    Ok(port)
}

/// Line settings expected by the device: 8 data bits, no parity, one stop bit.
pub fn configure(port: &mut Box<dyn SerialPort>, baud_rate: u32) -> Result<(), SerialError> {
    port.set_baud_rate(baud_rate).map_err(SerialError::Config)?;
    port.set_data_bits(DataBits::Eight)
        .map_err(SerialError::Config)?;
    port.set_parity(Parity::None).map_err(SerialError::Config)?;
    port.set_stop_bits(StopBits::One)
        .map_err(SerialError::Config)?;

    Ok(())
}

/// Transmit a command packet.
///
/// The device does not acknowledge Set Target, so nothing is read back.
pub fn send(command: Command, port: &mut Box<dyn SerialPort>) -> Result<(), SerialError> {
    write_packet(&command.build(), port)
}

// A short write is a hard failure; the remainder is never retried.
fn write_packet<W: Write>(packet: &[u8], writer: &mut W) -> Result<(), SerialError> {
    debug!("tx {packet:02x?}");

    let written = writer.write(packet).map_err(SerialError::Write)?;
    if written != packet.len() {
        return Err(SerialError::ShortWrite {
            written,
            expected: packet.len(),
        });
    }
    writer.flush().map_err(SerialError::Write)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{Channel, Instruction, PulseWidth};

    struct ShortWriter;

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len() - 1)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "device went away",
            ))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn packet() -> Vec<u8> {
        let channel = Channel::new(0).unwrap();
        let target = PulseWidth::from_microseconds(1500).unwrap().target();
        Command::new(channel, Instruction::set_target(target)).build()
    }

    #[test]
    fn writes_packet_bytes_unchanged() {
        let mut sink = Vec::new();
        write_packet(&packet(), &mut sink).unwrap();

        // 1500 us = 6000 ticks -> low7 0x70, high7 0x2e.
        assert_eq!(sink, [0x84, 0x00, 0x70, 0x2e]);
    }

    #[test]
    fn short_write_is_a_hard_failure() {
        let result = write_packet(&packet(), &mut ShortWriter);

        assert!(matches!(
            result,
            Err(SerialError::ShortWrite {
                written: 3,
                expected: 4,
            })
        ));
    }

    #[test]
    fn write_error_is_propagated() {
        let result = write_packet(&packet(), &mut FailingWriter);

        assert!(matches!(result, Err(SerialError::Write(_))));
    }
}
