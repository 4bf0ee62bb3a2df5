use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, Tlli, expect_message_type, expect_value, let_field};

use crate::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use crate::l3::enums::rr_message_type::RrMessageType;
use crate::l3::fields::routing_area_id::RoutingAreaId;
use crate::l3::l3_message::L3Header;


/// Representation of the GPRS SUSPENSION REQUEST message (04.08 clause 9.1.13b).
/// Sent by a class B MS to suspend its GPRS services while in dedicated mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GprsSuspensionRequest {
    pub tlli: Tlli,
    pub rai: RoutingAreaId,
    pub suspension_cause: u8,
}

impl GprsSuspensionRequest {
    /// Parse from BitBuffer, starting at the L3 header
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let hdr = L3Header::from_bitbuf(buffer)?;
        expect_value!(hdr.pd as u64, ProtocolDiscriminator::RadioResource.into_raw(), "protocol_discriminator")?;
        expect_message_type!(hdr.message_type() as u64, RrMessageType::GprsSuspensionRequest)?;

        let_field!(buffer, tlli, 32);
        let rai = RoutingAreaId::from_bitbuf(buffer)?;
        let_field!(buffer, suspension_cause, 8);

        Ok(GprsSuspensionRequest {
            tlli: tlli as Tlli,
            rai,
            suspension_cause: suspension_cause as u8,
        })
    }

    /// Serialize this PDU into the given BitBuffer.
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        L3Header::new(ProtocolDiscriminator::RadioResource, RrMessageType::GprsSuspensionRequest.into_raw() as u8)
            .to_bitbuf(buffer);
        buffer.write_bits(self.tlli as u64, 32);
        self.rai.to_bitbuf(buffer)?;
        buffer.write_bits(self.suspension_cause as u64, 8);
        Ok(())
    }
}

impl fmt::Display for GprsSuspensionRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GprsSuspensionRequest {{ tlli: {:#010x} rai: {} cause: {} }}",
            self.tlli,
            self.rai,
            self.suspension_cause,
        )
    }
}
