use core::fmt;

use gsm_core::{PduParseErr, Tfi, Tlli};
use gsm_saps::RlcMacFrame;

use crate::rlcmac::enums::payload_type::PayloadType;
use crate::rlcmac::pdus::data_block::RlcMacDataBlock;
use crate::rlcmac::pdus::uplink_control_block::RlcMacUplinkControlBlock;


/// A decoded uplink RLC/MAC block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlcMacBlock {
    Data(RlcMacDataBlock),
    Control(RlcMacUplinkControlBlock),
    /// Payload type 11, nothing further is decoded
    Reserved,
}

impl RlcMacBlock {
    /// Payload type of a raw frame, from the first two bits
    pub fn peek_payload_type(frame: &RlcMacFrame) -> Option<PayloadType> {
        let buf = frame.bitbuf();
        let raw = buf.peek_bits(2)?;
        PayloadType::try_from(raw).ok()
    }

    pub fn from_frame(frame: &RlcMacFrame) -> Result<Self, PduParseErr> {
        let Some(payload_type) = Self::peek_payload_type(frame) else {
            return Err(PduParseErr::BufferEnded { field: Some("payload_type") });
        };
        let mut buf = frame.bitbuf();
        match payload_type {
            PayloadType::Data => Ok(RlcMacBlock::Data(RlcMacDataBlock::from_bitbuf(&mut buf)?)),
            PayloadType::Control1 | PayloadType::Control2 =>
                Ok(RlcMacBlock::Control(RlcMacUplinkControlBlock::from_bitbuf(&mut buf)?)),
            PayloadType::Reserved => Ok(RlcMacBlock::Reserved),
        }
    }

    pub fn payload_type(&self) -> PayloadType {
        match self {
            RlcMacBlock::Data(_) => PayloadType::Data,
            RlcMacBlock::Control(c) => c.payload_type,
            RlcMacBlock::Reserved => PayloadType::Reserved,
        }
    }

    pub fn tfi(&self) -> Option<Tfi> {
        match self {
            RlcMacBlock::Data(d) => Some(d.tfi),
            _ => None,
        }
    }

    pub fn tlli(&self) -> Option<Tlli> {
        match self {
            RlcMacBlock::Data(d) => d.tlli,
            _ => None,
        }
    }
}

impl fmt::Display for RlcMacBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RlcMacBlock::Data(d) => write!(f, "{}", d),
            RlcMacBlock::Control(c) => write!(f, "{}", c),
            RlcMacBlock::Reserved => write!(f, "Reserved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_on_payload_type() {
        let data = RlcMacFrame::from_bytes(&[0x00, 0x0B, 0x07, 0x12, 0x34, 0x56, 0x78]);
        let block = RlcMacBlock::from_frame(&data).unwrap();
        assert_eq!(block.payload_type(), PayloadType::Data);
        assert_eq!(block.tfi(), Some(5));
        assert_eq!(block.tlli(), Some(0x12345678));

        let ctrl = RlcMacFrame::from_bytes(&[0x80, 0x04, 0x00]);
        let block = RlcMacBlock::from_frame(&ctrl).unwrap();
        assert_eq!(block.payload_type(), PayloadType::Control2);

        let reserved = RlcMacFrame::from_bytes(&[0xC0]);
        assert_eq!(RlcMacBlock::from_frame(&reserved).unwrap(), RlcMacBlock::Reserved);

        assert!(RlcMacBlock::from_frame(&RlcMacFrame::new(vec![])).is_err());
    }
}
