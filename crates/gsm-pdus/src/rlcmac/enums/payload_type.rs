/// 04.60 clause 10.4.7 payload type
/// Bits: 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PayloadType {
    /// RLC/MAC block containing an RLC data block
    Data = 0,
    /// RLC/MAC block containing an RLC/MAC control block without the optional octets
    Control1 = 1,
    /// RLC/MAC block containing an RLC/MAC control block with the optional octets
    Control2 = 2,
    Reserved = 3,
}

impl std::convert::TryFrom<u64> for PayloadType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(PayloadType::Data),
            1 => Ok(PayloadType::Control1),
            2 => Ok(PayloadType::Control2),
            3 => Ok(PayloadType::Reserved),
            _ => Err(()),
        }
    }
}

impl PayloadType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    pub fn is_control(self) -> bool {
        matches!(self, PayloadType::Control1 | PayloadType::Control2)
    }
}

impl From<PayloadType> for u64 {
    fn from(e: PayloadType) -> Self { e.into_raw() }
}

impl core::fmt::Display for PayloadType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PayloadType::Data => write!(f, "Data"),
            PayloadType::Control1 => write!(f, "Control1"),
            PayloadType::Control2 => write!(f, "Control2"),
            PayloadType::Reserved => write!(f, "Reserved"),
        }
    }
}
