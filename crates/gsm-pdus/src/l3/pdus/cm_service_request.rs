use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, expect_message_type, expect_value, let_field};

use crate::l3::enums::cm_service_type::CmServiceType;
use crate::l3::enums::mm_message_type::MmMessageType;
use crate::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use crate::l3::fields::classmark::Classmark2;
use crate::l3::fields::mobile_identity::MobileIdentity;
use crate::l3::l3_message::L3Header;


/// Representation of the CM SERVICE REQUEST message (04.08 clause 9.2.9).
/// The MS sends this message to request a service for the connection management sublayer entities.
/// Response expected: CM SERVICE ACCEPT/CM SERVICE REJECT
/// Response to: -
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmServiceRequest {
    pub cksn: u8,
    pub service_type: CmServiceType,
    pub classmark2: Classmark2,
    pub mobile_identity: MobileIdentity,
}

impl CmServiceRequest {
    /// Parse from BitBuffer, starting at the L3 header
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let hdr = L3Header::from_bitbuf(buffer)?;
        expect_value!(hdr.pd as u64, ProtocolDiscriminator::MobilityManagement.into_raw(), "protocol_discriminator")?;
        expect_message_type!(hdr.message_type() as u64, MmMessageType::CmServiceRequest)?;

        let_field!(buffer, _spare, 1);
        let_field!(buffer, cksn, 3);
        let_field!(buffer, service_type, 4);
        let Ok(service_type) = CmServiceType::try_from(service_type) else {
            return Err(PduParseErr::InvalidValue { field: "service_type", value: service_type });
        };

        let classmark2 = Classmark2::from_bitbuf(buffer)?;
        let mobile_identity = MobileIdentity::from_bitbuf(buffer)?;

        Ok(CmServiceRequest {
            cksn: cksn as u8,
            service_type,
            classmark2,
            mobile_identity,
        })
    }

    /// Serialize this PDU into the given BitBuffer.
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        L3Header::new(ProtocolDiscriminator::MobilityManagement, MmMessageType::CmServiceRequest.into_raw() as u8)
            .to_bitbuf(buffer);
        buffer.write_bits(0, 1);
        buffer.write_bits(self.cksn as u64, 3);
        buffer.write_bits(self.service_type.into_raw(), 4);
        self.classmark2.to_bitbuf(buffer);
        self.mobile_identity.to_bitbuf(buffer)
    }
}

impl fmt::Display for CmServiceRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CmServiceRequest {{ service: {} id: {} cksn: {} }}",
            self.service_type,
            self.mobile_identity,
            self.cksn,
        )
    }
}
