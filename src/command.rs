use crate::hardware::{Channel, Instruction};

pub struct Command {
    pub channel: Channel,
    pub instruction: Instruction,
}

impl Command {
    pub fn new(channel: Channel, instruction: Instruction) -> Self {
        Self {
            channel,
            instruction,
        }
    }

    /// The compact protocol frames a command as opcode, channel, payload.
    /// There is no length field and no checksum.
    pub(crate) fn build(self) -> Vec<u8> {
        let mut packet = Vec::from([self.instruction.opcode(), self.channel.into()]);
        packet.extend(self.instruction.data());

        packet
    }
}
