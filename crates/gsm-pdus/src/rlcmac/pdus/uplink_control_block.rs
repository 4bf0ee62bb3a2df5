use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, let_field};

use crate::rlcmac::enums::control_message_type::UlControlMessageType;
use crate::rlcmac::enums::payload_type::PayloadType;


/// Uplink RLC/MAC control block (04.60 clause 10.3.2). The MAC header is decoded;
/// the control message is kept as raw octets for whichever handler takes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlcMacUplinkControlBlock {
    pub payload_type: PayloadType,
    pub retry: bool,
    /// 6 bits
    pub message_type: u8,
    /// Control message octets, starting with the message type octet
    pub message: Vec<u8>,
}

impl RlcMacUplinkControlBlock {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, payload_type, 2);
        let payload_type = match PayloadType::try_from(payload_type) {
            Ok(pt) if pt.is_control() => pt,
            _ => return Err(PduParseErr::InvalidValue { field: "payload_type", value: payload_type }),
        };
        let_field!(buffer, _spare, 5);
        let_field!(buffer, retry, 1);

        let message = buffer.read_octets(buffer.get_len_remaining() / 8, "control_message")?;
        let Some(first) = message.first() else {
            return Err(PduParseErr::BufferEnded { field: Some("message_type") });
        };
        let message_type = first >> 2;

        Ok(RlcMacUplinkControlBlock {
            payload_type,
            retry: retry == 1,
            message_type,
            message,
        })
    }

    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) {
        buffer.write_bits(self.payload_type.into_raw(), 2);
        buffer.write_bits(0, 5);
        buffer.write_bit(self.retry as u8);
        buffer.write_octets(&self.message);
    }

    pub fn known_message_type(&self) -> Option<UlControlMessageType> {
        UlControlMessageType::try_from(self.message_type as u64).ok()
    }
}

impl fmt::Display for RlcMacUplinkControlBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.known_message_type() {
            Some(t) => write!(f, "{} {}", self.payload_type, t),
            None => write!(f, "{} message type {:#04x}", self.payload_type, self.message_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_control_ack() {
        // Control1, PACKET CONTROL ACKNOWLEDGEMENT
        let mut buf = BitBuffer::from_hexstr("40 04 12 34 56 78 03").unwrap();
        let block = RlcMacUplinkControlBlock::from_bitbuf(&mut buf).expect("Failed parsing");
        assert_eq!(block.payload_type, PayloadType::Control1);
        assert_eq!(block.known_message_type(), Some(UlControlMessageType::PacketControlAcknowledgement));
        assert_eq!(block.message.len(), 6);
    }

    #[test]
    fn test_data_payload_rejected() {
        let mut buf = BitBuffer::from_hexstr("00 04").unwrap();
        assert!(RlcMacUplinkControlBlock::from_bitbuf(&mut buf).is_err());
    }
}
