use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, expect_message_type, expect_value};

use crate::l3::enums::mm_message_type::MmMessageType;
use crate::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use crate::l3::fields::classmark::Classmark1;
use crate::l3::fields::mobile_identity::MobileIdentity;
use crate::l3::l3_message::L3Header;


/// Representation of the IMSI DETACH INDICATION message (04.08 clause 9.2.12).
/// The MS sends this message to set the deactivation indication in the network.
/// Response expected: -
/// Response to: -
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImsiDetachIndication {
    pub classmark1: Classmark1,
    pub mobile_identity: MobileIdentity,
}

impl ImsiDetachIndication {
    /// Parse from BitBuffer, starting at the L3 header
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let hdr = L3Header::from_bitbuf(buffer)?;
        expect_value!(hdr.pd as u64, ProtocolDiscriminator::MobilityManagement.into_raw(), "protocol_discriminator")?;
        expect_message_type!(hdr.message_type() as u64, MmMessageType::ImsiDetachIndication)?;

        let classmark1 = Classmark1::from_bitbuf(buffer)?;
        let mobile_identity = MobileIdentity::from_bitbuf(buffer)?;
        Ok(ImsiDetachIndication { classmark1, mobile_identity })
    }

    /// Serialize this PDU into the given BitBuffer.
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        L3Header::new(ProtocolDiscriminator::MobilityManagement, MmMessageType::ImsiDetachIndication.into_raw() as u8)
            .to_bitbuf(buffer);
        self.classmark1.to_bitbuf(buffer);
        self.mobile_identity.to_bitbuf(buffer)
    }
}

impl fmt::Display for ImsiDetachIndication {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ImsiDetachIndication {{ id: {} }}", self.mobile_identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imsi_detach_indication() {
        // N(SD) bit set in the message type octet must be ignored
        let test_vec = "05 41 33 08 09 10 10 10 32 54 76 98";
        let mut buf_in = BitBuffer::from_hexstr(test_vec).unwrap();
        let pdu = ImsiDetachIndication::from_bitbuf(&mut buf_in).expect("Failed parsing");
        assert_eq!(buf_in.get_len_remaining(), 0);
        assert_eq!(pdu.mobile_identity, MobileIdentity::Imsi("001010123456789".to_string()));
        assert_eq!(pdu.to_string(), "ImsiDetachIndication { id: IMSI001010123456789 }");
    }
}
