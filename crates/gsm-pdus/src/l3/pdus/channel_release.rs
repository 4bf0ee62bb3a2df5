use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, expect_message_type, expect_value, let_field};
use gsm_saps::L3Frame;

use crate::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use crate::l3::enums::release_cause::ReleaseCause;
use crate::l3::enums::rr_message_type::RrMessageType;
use crate::l3::l3_message::L3Header;


/// Representation of the CHANNEL RELEASE message (04.08 clause 9.1.7).
/// Sent by the network to release the dedicated channel.
/// Response expected: -
/// Response to: -
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRelease {
    pub rr_cause: ReleaseCause,
}

impl ChannelRelease {
    pub fn new(rr_cause: ReleaseCause) -> Self {
        Self { rr_cause }
    }

    /// Parse from BitBuffer, starting at the L3 header
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let hdr = L3Header::from_bitbuf(buffer)?;
        expect_value!(hdr.pd as u64, ProtocolDiscriminator::RadioResource.into_raw(), "protocol_discriminator")?;
        expect_message_type!(hdr.message_type() as u64, RrMessageType::ChannelRelease)?;

        let_field!(buffer, rr_cause, 8);
        let Ok(rr_cause) = ReleaseCause::try_from(rr_cause) else {
            return Err(PduParseErr::InvalidValue { field: "rr_cause", value: rr_cause });
        };
        Ok(ChannelRelease { rr_cause })
    }

    /// Serialize this PDU into the given BitBuffer.
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) {
        L3Header::new(ProtocolDiscriminator::RadioResource, RrMessageType::ChannelRelease.into_raw() as u8)
            .to_bitbuf(buffer);
        buffer.write_bits(self.rr_cause.into_raw(), 8);
    }

    /// Encode into a frame ready to be sent on a channel
    pub fn to_frame(&self) -> L3Frame {
        let mut buf = BitBuffer::new_autoexpand(24);
        self.to_bitbuf(&mut buf);
        L3Frame::from(buf)
    }
}

impl fmt::Display for ChannelRelease {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ChannelRelease {{ cause: {} }}", self.rr_cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_release_frame() {
        let frame = ChannelRelease::new(ReleaseCause::MessageTypeNotImplemented).to_frame();
        assert_eq!(frame.as_bytes(), &[0x06, 0x0D, 0x61]);

        let frame = ChannelRelease::new(ReleaseCause::AbnormalTimerExpired).to_frame();
        assert_eq!(frame.as_bytes(), &[0x06, 0x0D, 0x03]);
    }

    #[test]
    fn test_channel_release_parse() {
        let mut buf = BitBuffer::from_hexstr("060D62").unwrap();
        let pdu = ChannelRelease::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.rr_cause, ReleaseCause::MessageTypeNotCompatibleWithProtocolState);

        let mut buf = BitBuffer::from_hexstr("060D44").unwrap();
        assert!(ChannelRelease::from_bitbuf(&mut buf).is_err());
    }
}
