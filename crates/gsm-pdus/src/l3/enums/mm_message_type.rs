/// 04.08 clause 10.4 table 10.2, MM message types
/// Bits: 6 (bits 7 and 8 carry the send sequence number and are masked off)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MmMessageType {
    ImsiDetachIndication = 0x01,
    LocationUpdatingAccept = 0x02,
    LocationUpdatingReject = 0x04,
    LocationUpdatingRequest = 0x08,
    AuthenticationReject = 0x11,
    AuthenticationRequest = 0x12,
    AuthenticationResponse = 0x14,
    IdentityRequest = 0x18,
    IdentityResponse = 0x19,
    TmsiReallocationCommand = 0x1A,
    TmsiReallocationComplete = 0x1B,
    CmServiceAccept = 0x21,
    CmServiceReject = 0x22,
    CmServiceAbort = 0x23,
    CmServiceRequest = 0x24,
    CmReestablishmentRequest = 0x28,
    Abort = 0x29,
    MmNull = 0x30,
    MmStatus = 0x31,
    MmInformation = 0x32,
}

impl MmMessageType {
    pub const MASK: u8 = 0x3F;
}

impl std::convert::TryFrom<u64> for MmMessageType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x01 => Ok(MmMessageType::ImsiDetachIndication),
            0x02 => Ok(MmMessageType::LocationUpdatingAccept),
            0x04 => Ok(MmMessageType::LocationUpdatingReject),
            0x08 => Ok(MmMessageType::LocationUpdatingRequest),
            0x11 => Ok(MmMessageType::AuthenticationReject),
            0x12 => Ok(MmMessageType::AuthenticationRequest),
            0x14 => Ok(MmMessageType::AuthenticationResponse),
            0x18 => Ok(MmMessageType::IdentityRequest),
            0x19 => Ok(MmMessageType::IdentityResponse),
            0x1A => Ok(MmMessageType::TmsiReallocationCommand),
            0x1B => Ok(MmMessageType::TmsiReallocationComplete),
            0x21 => Ok(MmMessageType::CmServiceAccept),
            0x22 => Ok(MmMessageType::CmServiceReject),
            0x23 => Ok(MmMessageType::CmServiceAbort),
            0x24 => Ok(MmMessageType::CmServiceRequest),
            0x28 => Ok(MmMessageType::CmReestablishmentRequest),
            0x29 => Ok(MmMessageType::Abort),
            0x30 => Ok(MmMessageType::MmNull),
            0x31 => Ok(MmMessageType::MmStatus),
            0x32 => Ok(MmMessageType::MmInformation),
            _ => Err(()),
        }
    }
}

impl MmMessageType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<MmMessageType> for u64 {
    fn from(e: MmMessageType) -> Self { e.into_raw() }
}

impl core::fmt::Display for MmMessageType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MmMessageType::ImsiDetachIndication => write!(f, "IMSIDetachIndication"),
            MmMessageType::LocationUpdatingAccept => write!(f, "LocationUpdatingAccept"),
            MmMessageType::LocationUpdatingReject => write!(f, "LocationUpdatingReject"),
            MmMessageType::LocationUpdatingRequest => write!(f, "LocationUpdatingRequest"),
            MmMessageType::AuthenticationReject => write!(f, "AuthenticationReject"),
            MmMessageType::AuthenticationRequest => write!(f, "AuthenticationRequest"),
            MmMessageType::AuthenticationResponse => write!(f, "AuthenticationResponse"),
            MmMessageType::IdentityRequest => write!(f, "IdentityRequest"),
            MmMessageType::IdentityResponse => write!(f, "IdentityResponse"),
            MmMessageType::TmsiReallocationCommand => write!(f, "TMSIReallocationCommand"),
            MmMessageType::TmsiReallocationComplete => write!(f, "TMSIReallocationComplete"),
            MmMessageType::CmServiceAccept => write!(f, "CMServiceAccept"),
            MmMessageType::CmServiceReject => write!(f, "CMServiceReject"),
            MmMessageType::CmServiceAbort => write!(f, "CMServiceAbort"),
            MmMessageType::CmServiceRequest => write!(f, "CMServiceRequest"),
            MmMessageType::CmReestablishmentRequest => write!(f, "CMReestablishmentRequest"),
            MmMessageType::Abort => write!(f, "Abort"),
            MmMessageType::MmNull => write!(f, "MMNull"),
            MmMessageType::MmStatus => write!(f, "MMStatus"),
            MmMessageType::MmInformation => write!(f, "MMInformation"),
        }
    }
}
