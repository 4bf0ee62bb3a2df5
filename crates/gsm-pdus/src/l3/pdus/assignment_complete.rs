use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, expect_message_type, expect_value, let_field};

use crate::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use crate::l3::enums::release_cause::ReleaseCause;
use crate::l3::enums::rr_message_type::RrMessageType;
use crate::l3::l3_message::L3Header;


/// Representation of the ASSIGNMENT COMPLETE message (04.08 clause 9.1.3).
/// Sent on the new main DCCH once the MS has seized the assigned channel.
/// Response expected: -
/// Response to: ASSIGNMENT COMMAND
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentComplete {
    /// Raw RR cause; values outside the known set are kept as received
    pub rr_cause: u8,
}

impl AssignmentComplete {
    /// Parse from BitBuffer, starting at the L3 header
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let hdr = L3Header::from_bitbuf(buffer)?;
        expect_value!(hdr.pd as u64, ProtocolDiscriminator::RadioResource.into_raw(), "protocol_discriminator")?;
        expect_message_type!(hdr.message_type() as u64, RrMessageType::AssignmentComplete)?;

        let_field!(buffer, rr_cause, 8);
        Ok(AssignmentComplete { rr_cause: rr_cause as u8 })
    }

    /// Serialize this PDU into the given BitBuffer.
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        L3Header::new(ProtocolDiscriminator::RadioResource, RrMessageType::AssignmentComplete.into_raw() as u8)
            .to_bitbuf(buffer);
        buffer.write_bits(self.rr_cause as u64, 8);
        Ok(())
    }

    pub fn cause(&self) -> Option<ReleaseCause> {
        ReleaseCause::try_from(self.rr_cause as u64).ok()
    }
}

impl fmt::Display for AssignmentComplete {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.cause() {
            Some(c) => write!(f, "AssignmentComplete {{ cause: {} }}", c),
            None => write!(f, "AssignmentComplete {{ cause: {:#04x} }}", self.rr_cause),
        }
    }
}
