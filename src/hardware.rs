use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel value out of allowed range, 0 to 11.")]
    Range,
}

/// An addressable servo output on the controller. The supported hardware
/// variant (Mini Maestro 12) exposes channels 0 through 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel(u8);

impl Channel {
    const MAX: u8 = 11;

    pub fn new(value: u8) -> Result<Self, ChannelError> {
        (value <= Self::MAX)
            .then(|| Self(value))
            .ok_or(ChannelError::Range)
    }

    pub fn all() -> impl Iterator<Item = Channel> {
        (0..=Self::MAX).map(Self)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.value()
    }
}

impl TryFrom<u8> for Channel {
    type Error = ChannelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Error, Clone, Copy)]
pub enum PulseWidthError {
    #[error("Pulse width out of allowed range, {min} to {max} us.", min = PulseWidth::MIN, max = PulseWidth::MAX)]
    Range,
}

/// A servo pulse width in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseWidth(u16);

impl PulseWidth {
    const MIN: u16 = 250;
    const MAX: u16 = 2500;

    pub fn from_microseconds(value: u16) -> Result<Self, PulseWidthError> {
        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then(|| Self(value))
            .ok_or(PulseWidthError::Range)
    }

    pub fn microseconds(self) -> u16 {
        self.0
    }

    /// The device positions servos in quarter-microsecond ticks.
    pub fn target(self) -> Target {
        Target(self.0 * 4)
    }
}

#[derive(Debug, Error, Clone, Copy)]
pub enum PropertyError {
    #[error("The property is out of range.")]
    OutOfRange,
}

/// A position target in the controller's quarter-microsecond units.
/// The wire format carries 14 bits, so values above 0x3fff cannot be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target(u16);

impl Target {
    const MAX: u16 = 0x3fff;

    pub fn new_raw(value: u16) -> Result<Self, PropertyError> {
        (value <= Self::MAX)
            .then(|| Self(value))
            .ok_or(PropertyError::OutOfRange)
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

#[derive(Debug)]
pub enum Instruction {
    SetTarget(Target),
}

impl Instruction {
    pub fn set_target(target: Target) -> Self {
        Self::SetTarget(target)
    }

    pub(crate) fn opcode(&self) -> u8 {
        match self {
            Self::SetTarget(_) => 0x84,
        }
    }

    pub(crate) fn data(self) -> Vec<u8> {
        match self {
            // 14-bit target split into two 7-bit bytes, low bits first.
            Self::SetTarget(target) => {
                let value = target.value();
                Vec::from([(value & 0x7f) as u8, ((value >> 7) & 0x7f) as u8])
            }
        }
    }
}
