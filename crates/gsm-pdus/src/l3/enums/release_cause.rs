/// 04.08 clause 10.5.2.31 RR cause, as carried in CHANNEL RELEASE
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReleaseCause {
    Normal = 0x00,
    AbnormalUnspecified = 0x01,
    ChannelUnacceptable = 0x02,
    AbnormalTimerExpired = 0x03,
    NoActivityOnRadioPath = 0x05,
    SemanticallyIncorrect = 0x5F,
    InvalidMandatoryInformation = 0x60,
    MessageTypeNotImplemented = 0x61,
    MessageTypeNotCompatibleWithProtocolState = 0x62,
    ProtocolErrorUnspecified = 0x6F,
}

impl std::convert::TryFrom<u64> for ReleaseCause {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x00 => Ok(ReleaseCause::Normal),
            0x01 => Ok(ReleaseCause::AbnormalUnspecified),
            0x02 => Ok(ReleaseCause::ChannelUnacceptable),
            0x03 => Ok(ReleaseCause::AbnormalTimerExpired),
            0x05 => Ok(ReleaseCause::NoActivityOnRadioPath),
            0x5F => Ok(ReleaseCause::SemanticallyIncorrect),
            0x60 => Ok(ReleaseCause::InvalidMandatoryInformation),
            0x61 => Ok(ReleaseCause::MessageTypeNotImplemented),
            0x62 => Ok(ReleaseCause::MessageTypeNotCompatibleWithProtocolState),
            0x6F => Ok(ReleaseCause::ProtocolErrorUnspecified),
            _ => Err(()),
        }
    }
}

impl ReleaseCause {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<ReleaseCause> for u64 {
    fn from(e: ReleaseCause) -> Self { e.into_raw() }
}

impl core::fmt::Display for ReleaseCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReleaseCause::Normal => write!(f, "Normal"),
            ReleaseCause::AbnormalUnspecified => write!(f, "AbnormalUnspecified"),
            ReleaseCause::ChannelUnacceptable => write!(f, "ChannelUnacceptable"),
            ReleaseCause::AbnormalTimerExpired => write!(f, "AbnormalTimerExpired"),
            ReleaseCause::NoActivityOnRadioPath => write!(f, "NoActivityOnRadioPath"),
            ReleaseCause::SemanticallyIncorrect => write!(f, "SemanticallyIncorrect"),
            ReleaseCause::InvalidMandatoryInformation => write!(f, "InvalidMandatoryInformation"),
            ReleaseCause::MessageTypeNotImplemented => write!(f, "MessageTypeNotImplemented"),
            ReleaseCause::MessageTypeNotCompatibleWithProtocolState => write!(f, "MessageTypeNotCompatibleWithProtocolState"),
            ReleaseCause::ProtocolErrorUnspecified => write!(f, "ProtocolErrorUnspecified"),
        }
    }
}
