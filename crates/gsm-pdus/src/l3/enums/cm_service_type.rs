/// 04.08 clause 10.5.3.3 CM service type
/// Bits: 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CmServiceType {
    MobileOriginatingCall = 1,
    EmergencyCall = 2,
    ShortMessage = 4,
    SupplementaryService = 8,
    VoiceGroupCall = 9,
    VoiceBroadcastCall = 10,
    LocationServices = 11,
}

impl std::convert::TryFrom<u64> for CmServiceType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            1 => Ok(CmServiceType::MobileOriginatingCall),
            2 => Ok(CmServiceType::EmergencyCall),
            4 => Ok(CmServiceType::ShortMessage),
            8 => Ok(CmServiceType::SupplementaryService),
            9 => Ok(CmServiceType::VoiceGroupCall),
            10 => Ok(CmServiceType::VoiceBroadcastCall),
            11 => Ok(CmServiceType::LocationServices),
            _ => Err(()),
        }
    }
}

impl CmServiceType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<CmServiceType> for u64 {
    fn from(e: CmServiceType) -> Self { e.into_raw() }
}

impl core::fmt::Display for CmServiceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CmServiceType::MobileOriginatingCall => write!(f, "MOC"),
            CmServiceType::EmergencyCall => write!(f, "Emergency"),
            CmServiceType::ShortMessage => write!(f, "SMS"),
            CmServiceType::SupplementaryService => write!(f, "SS"),
            CmServiceType::VoiceGroupCall => write!(f, "VGCS"),
            CmServiceType::VoiceBroadcastCall => write!(f, "VBS"),
            CmServiceType::LocationServices => write!(f, "LCS"),
        }
    }
}
