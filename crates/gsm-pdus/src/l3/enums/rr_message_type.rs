/// 04.08 clause 10.4 table 10.1, RR message types
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RrMessageType {
    ChannelRelease = 0x0D,
    RrStatus = 0x12,
    MeasurementReport = 0x15,
    ClassmarkChange = 0x16,
    PagingRequestType1 = 0x21,
    PagingResponse = 0x27,
    AssignmentComplete = 0x29,
    HandoverComplete = 0x2C,
    AssignmentCommand = 0x2E,
    AssignmentFailure = 0x2F,
    CipheringModeComplete = 0x32,
    GprsSuspensionRequest = 0x34,
    ApplicationInformation = 0x38,
    ImmediateAssignment = 0x3F,
}

impl std::convert::TryFrom<u64> for RrMessageType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x0D => Ok(RrMessageType::ChannelRelease),
            0x12 => Ok(RrMessageType::RrStatus),
            0x15 => Ok(RrMessageType::MeasurementReport),
            0x16 => Ok(RrMessageType::ClassmarkChange),
            0x21 => Ok(RrMessageType::PagingRequestType1),
            0x27 => Ok(RrMessageType::PagingResponse),
            0x29 => Ok(RrMessageType::AssignmentComplete),
            0x2C => Ok(RrMessageType::HandoverComplete),
            0x2E => Ok(RrMessageType::AssignmentCommand),
            0x2F => Ok(RrMessageType::AssignmentFailure),
            0x32 => Ok(RrMessageType::CipheringModeComplete),
            0x34 => Ok(RrMessageType::GprsSuspensionRequest),
            0x38 => Ok(RrMessageType::ApplicationInformation),
            0x3F => Ok(RrMessageType::ImmediateAssignment),
            _ => Err(()),
        }
    }
}

impl RrMessageType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<RrMessageType> for u64 {
    fn from(e: RrMessageType) -> Self { e.into_raw() }
}

impl core::fmt::Display for RrMessageType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RrMessageType::ChannelRelease => write!(f, "ChannelRelease"),
            RrMessageType::RrStatus => write!(f, "RRStatus"),
            RrMessageType::MeasurementReport => write!(f, "MeasurementReport"),
            RrMessageType::ClassmarkChange => write!(f, "ClassmarkChange"),
            RrMessageType::PagingRequestType1 => write!(f, "PagingRequestType1"),
            RrMessageType::PagingResponse => write!(f, "PagingResponse"),
            RrMessageType::AssignmentComplete => write!(f, "AssignmentComplete"),
            RrMessageType::HandoverComplete => write!(f, "HandoverComplete"),
            RrMessageType::AssignmentCommand => write!(f, "AssignmentCommand"),
            RrMessageType::AssignmentFailure => write!(f, "AssignmentFailure"),
            RrMessageType::CipheringModeComplete => write!(f, "CipheringModeComplete"),
            RrMessageType::GprsSuspensionRequest => write!(f, "GPRSSuspensionRequest"),
            RrMessageType::ApplicationInformation => write!(f, "ApplicationInformation"),
            RrMessageType::ImmediateAssignment => write!(f, "ImmediateAssignment"),
        }
    }
}
