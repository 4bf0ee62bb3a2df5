use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, let_field};

use super::location_area_id::LocationAreaId;


/// 04.08 clause 10.5.5.15 routing area identification (V, 6 octets)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingAreaId {
    pub lai: LocationAreaId,
    pub rac: u8,
}

impl RoutingAreaId {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let lai = LocationAreaId::from_bitbuf(buffer)?;
        let_field!(buffer, rac, 8);
        Ok(RoutingAreaId { lai, rac: rac as u8 })
    }

    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        self.lai.to_bitbuf(buffer)?;
        buffer.write_bits(self.rac as u64, 8);
        Ok(())
    }
}

impl fmt::Display for RoutingAreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lai, self.rac)
    }
}
