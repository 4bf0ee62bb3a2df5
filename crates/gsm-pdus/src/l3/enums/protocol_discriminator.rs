/// 04.08 clause 10.2 protocol discriminator
/// Bits: 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProtocolDiscriminator {
    GroupCallControl = 0,
    BroadcastCallControl = 1,
    CallControl = 3,
    MobilityManagement = 5,
    RadioResource = 6,
    GprsMobilityManagement = 8,
    Sms = 9,
    GprsSessionManagement = 10,
    NonCallSs = 11,
    LocationServices = 12,
    Test = 15,
}

impl std::convert::TryFrom<u64> for ProtocolDiscriminator {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(ProtocolDiscriminator::GroupCallControl),
            1 => Ok(ProtocolDiscriminator::BroadcastCallControl),
            3 => Ok(ProtocolDiscriminator::CallControl),
            5 => Ok(ProtocolDiscriminator::MobilityManagement),
            6 => Ok(ProtocolDiscriminator::RadioResource),
            8 => Ok(ProtocolDiscriminator::GprsMobilityManagement),
            9 => Ok(ProtocolDiscriminator::Sms),
            10 => Ok(ProtocolDiscriminator::GprsSessionManagement),
            11 => Ok(ProtocolDiscriminator::NonCallSs),
            12 => Ok(ProtocolDiscriminator::LocationServices),
            15 => Ok(ProtocolDiscriminator::Test),
            _ => Err(()),
        }
    }
}

impl ProtocolDiscriminator {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<ProtocolDiscriminator> for u64 {
    fn from(e: ProtocolDiscriminator) -> Self { e.into_raw() }
}

impl core::fmt::Display for ProtocolDiscriminator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProtocolDiscriminator::GroupCallControl => write!(f, "GCC"),
            ProtocolDiscriminator::BroadcastCallControl => write!(f, "BCC"),
            ProtocolDiscriminator::CallControl => write!(f, "CC"),
            ProtocolDiscriminator::MobilityManagement => write!(f, "MM"),
            ProtocolDiscriminator::RadioResource => write!(f, "RR"),
            ProtocolDiscriminator::GprsMobilityManagement => write!(f, "GMM"),
            ProtocolDiscriminator::Sms => write!(f, "SMS"),
            ProtocolDiscriminator::GprsSessionManagement => write!(f, "SM"),
            ProtocolDiscriminator::NonCallSs => write!(f, "SS"),
            ProtocolDiscriminator::LocationServices => write!(f, "LCS"),
            ProtocolDiscriminator::Test => write!(f, "TEST"),
        }
    }
}
