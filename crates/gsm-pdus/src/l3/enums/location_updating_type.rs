/// 04.08 clause 10.5.3.5 location updating type
/// Bits: 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LocationUpdatingType {
    Normal = 0,
    Periodic = 1,
    ImsiAttach = 2,
    Reserved = 3,
}

impl std::convert::TryFrom<u64> for LocationUpdatingType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(LocationUpdatingType::Normal),
            1 => Ok(LocationUpdatingType::Periodic),
            2 => Ok(LocationUpdatingType::ImsiAttach),
            3 => Ok(LocationUpdatingType::Reserved),
            _ => Err(()),
        }
    }
}

impl LocationUpdatingType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<LocationUpdatingType> for u64 {
    fn from(e: LocationUpdatingType) -> Self { e.into_raw() }
}

impl core::fmt::Display for LocationUpdatingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LocationUpdatingType::Normal => write!(f, "Normal"),
            LocationUpdatingType::Periodic => write!(f, "Periodic"),
            LocationUpdatingType::ImsiAttach => write!(f, "IMSIAttach"),
            LocationUpdatingType::Reserved => write!(f, "Reserved"),
        }
    }
}
