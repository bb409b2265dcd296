use log::info;
use serialport::SerialPort;

use crate::{
    command::Command,
    hardware::{Channel, Instruction, PulseWidth},
    serial::{self, SerialError},
};

/// One servo output on the controller.
pub struct Servo {
    channel: Channel,
}

impl Servo {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Command the servo to move to and hold the given pulse width.
    pub fn set_target(
        &self,
        width: PulseWidth,
        port: &mut Box<dyn SerialPort>,
    ) -> Result<(), SerialError> {
        let instruction = Instruction::set_target(width.target());
        let command = Command::new(self.channel, instruction);
        serial::send(command, port)?;

        info!(
            "channel {} set to {} us",
            self.channel.value(),
            width.microseconds()
        );

        Ok(())
    }
}
