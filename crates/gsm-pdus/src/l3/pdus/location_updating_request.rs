use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, expect_message_type, expect_value, let_field};

use crate::l3::enums::location_updating_type::LocationUpdatingType;
use crate::l3::enums::mm_message_type::MmMessageType;
use crate::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use crate::l3::fields::classmark::Classmark1;
use crate::l3::fields::location_area_id::LocationAreaId;
use crate::l3::fields::mobile_identity::MobileIdentity;
use crate::l3::l3_message::L3Header;


/// Representation of the LOCATION UPDATING REQUEST message (04.08 clause 9.2.15).
/// The MS sends this message to request an update of its location file or an IMSI attach.
/// Response expected: LOCATION UPDATING ACCEPT/LOCATION UPDATING REJECT
/// Response to: -
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationUpdatingRequest {
    /// 3 bits, ciphering key sequence number, 7 = no key available
    pub cksn: u8,
    pub follow_on_request: bool,
    pub location_updating_type: LocationUpdatingType,
    /// Location area the MS was last registered in
    pub lai: LocationAreaId,
    pub classmark1: Classmark1,
    pub mobile_identity: MobileIdentity,
}

impl LocationUpdatingRequest {
    /// Parse from BitBuffer, starting at the L3 header
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let hdr = L3Header::from_bitbuf(buffer)?;
        expect_value!(hdr.pd as u64, ProtocolDiscriminator::MobilityManagement.into_raw(), "protocol_discriminator")?;
        expect_message_type!(hdr.message_type() as u64, MmMessageType::LocationUpdatingRequest)?;

        let_field!(buffer, _spare1, 1);
        let_field!(buffer, cksn, 3);
        let_field!(buffer, follow_on_request, 1);
        let_field!(buffer, _spare2, 1);
        let_field!(buffer, lu_type, 2);
        // 2 bits always map to a value
        let location_updating_type = LocationUpdatingType::try_from(lu_type).unwrap_or(LocationUpdatingType::Reserved);

        let lai = LocationAreaId::from_bitbuf(buffer)?;
        let classmark1 = Classmark1::from_bitbuf(buffer)?;
        let mobile_identity = MobileIdentity::from_bitbuf(buffer)?;

        // Optional IEs (classmark 3 etc.) are not used and are left in the buffer

        Ok(LocationUpdatingRequest {
            cksn: cksn as u8,
            follow_on_request: follow_on_request == 1,
            location_updating_type,
            lai,
            classmark1,
            mobile_identity,
        })
    }

    /// Serialize this PDU into the given BitBuffer.
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        L3Header::new(ProtocolDiscriminator::MobilityManagement, MmMessageType::LocationUpdatingRequest.into_raw() as u8)
            .to_bitbuf(buffer);
        buffer.write_bits(0, 1);
        buffer.write_bits(self.cksn as u64, 3);
        buffer.write_bit(self.follow_on_request as u8);
        buffer.write_bits(0, 1);
        buffer.write_bits(self.location_updating_type.into_raw(), 2);
        self.lai.to_bitbuf(buffer)?;
        self.classmark1.to_bitbuf(buffer);
        self.mobile_identity.to_bitbuf(buffer)
    }
}

impl fmt::Display for LocationUpdatingRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocationUpdatingRequest {{ type: {} id: {} lai: {} cksn: {} }}",
            self.location_updating_type,
            self.mobile_identity,
            self.lai,
            self.cksn,
        )
    }
}

#[cfg(test)]
mod tests {
    use gsm_core::debug;

    use super::*;

    #[test]
    fn test_location_updating_request() {
        debug::setup_logging_verbose();
        // IMSI attach, CKSN 7, LAI 001-01-1000, TMSI 0x01020304
        let test_vec = "05 08 72 00 F1 10 03 E8 33 05 F4 01 02 03 04";
        let mut buf_in = BitBuffer::from_hexstr(test_vec).unwrap();
        let pdu = LocationUpdatingRequest::from_bitbuf(&mut buf_in).expect("Failed parsing");

        tracing::info!("Parsed: {}", pdu);
        assert_eq!(buf_in.get_len_remaining(), 0, "Buffer not fully consumed");
        assert_eq!(pdu.cksn, 7);
        assert!(!pdu.follow_on_request);
        assert_eq!(pdu.location_updating_type, LocationUpdatingType::ImsiAttach);
        assert_eq!(pdu.lai.lac, 1000);
        assert_eq!(pdu.classmark1.revision_level, 1);
        assert_eq!(pdu.classmark1.rf_power_capability, 3);
        assert_eq!(pdu.mobile_identity, MobileIdentity::Tmsi(0x01020304));

        let mut buf_out = BitBuffer::new_autoexpand(120);
        pdu.to_bitbuf(&mut buf_out).unwrap();
        assert_eq!(buf_out.dump_hex(), test_vec.replace(' ', ""));
    }

    #[test]
    fn test_wrong_message_type() {
        let mut buf_in = BitBuffer::from_hexstr("05 01 33 05 F4 01 02 03 04").unwrap();
        assert!(matches!(
            LocationUpdatingRequest::from_bitbuf(&mut buf_in),
            Err(PduParseErr::InvalidMessageType { expected: 0x08, found: 0x01 })
        ));
    }
}
