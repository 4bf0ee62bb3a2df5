use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, expect_message_type, expect_value, let_field};

use crate::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use crate::l3::enums::rr_message_type::RrMessageType;
use crate::l3::fields::classmark::Classmark2;
use crate::l3::fields::mobile_identity::MobileIdentity;
use crate::l3::l3_message::L3Header;


/// Representation of the PAGING RESPONSE message (04.08 clause 9.1.25).
/// Sent on the main DCCH by the MS in response to a paging request.
/// Response expected: -
/// Response to: PAGING REQUEST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingResponse {
    pub cksn: u8,
    pub classmark2: Classmark2,
    pub mobile_identity: MobileIdentity,
}

impl PagingResponse {
    /// Parse from BitBuffer, starting at the L3 header
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let hdr = L3Header::from_bitbuf(buffer)?;
        expect_value!(hdr.pd as u64, ProtocolDiscriminator::RadioResource.into_raw(), "protocol_discriminator")?;
        expect_message_type!(hdr.message_type() as u64, RrMessageType::PagingResponse)?;

        let_field!(buffer, _spare_half_octet, 4);
        let_field!(buffer, _spare, 1);
        let_field!(buffer, cksn, 3);
        let classmark2 = Classmark2::from_bitbuf(buffer)?;
        let mobile_identity = MobileIdentity::from_bitbuf(buffer)?;

        Ok(PagingResponse {
            cksn: cksn as u8,
            classmark2,
            mobile_identity,
        })
    }

    /// Serialize this PDU into the given BitBuffer.
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        L3Header::new(ProtocolDiscriminator::RadioResource, RrMessageType::PagingResponse.into_raw() as u8)
            .to_bitbuf(buffer);
        buffer.write_bits(0, 5);
        buffer.write_bits(self.cksn as u64, 3);
        self.classmark2.to_bitbuf(buffer);
        self.mobile_identity.to_bitbuf(buffer)
    }
}

impl fmt::Display for PagingResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PagingResponse {{ id: {} cksn: {} }}", self.mobile_identity, self.cksn)
    }
}
