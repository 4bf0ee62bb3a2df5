use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, Tfi, Tlli, expect_message_type, expect_value, let_field};
use gsm_saps::RlcMacFrame;

use crate::rlcmac::enums::control_message_type::DlControlMessageType;
use crate::rlcmac::enums::payload_type::PayloadType;


/// Length of a CS-1 RLC/MAC block
pub const RLCMAC_BLOCK_OCTETS: usize = 23;
/// 04.60 clause 11, spare padding octet
pub const SPARE_PADDING: u8 = 0x2B;

/// PACKET UPLINK ACK/NACK (04.60 clause 11.2.28), GPRS mode.
/// Acknowledges received uplink blocks and resolves contention by echoing the TLLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketUplinkAckNack {
    /// 2 bits
    pub page_mode: u8,
    pub uplink_tfi: Tfi,
    /// 2 bits, CS-1 .. CS-4
    pub channel_coding_command: u8,
    pub final_ack: bool,
    /// 7 bits
    pub starting_sequence_number: u8,
    pub received_block_bitmap: u64,
    /// Contention resolution TLLI
    pub tlli: Option<Tlli>,
}

impl PacketUplinkAckNack {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, message_type, 6);
        expect_message_type!(message_type, DlControlMessageType::PacketUplinkAckNack)?;
        let_field!(buffer, page_mode, 2);
        let_field!(buffer, fixed_00, 2);
        expect_value!(fixed_00, 0)?;
        let_field!(buffer, uplink_tfi, 5);
        let_field!(buffer, message_escape, 1);
        if message_escape != 0 {
            return Err(PduParseErr::NotImplemented { field: Some("EGPRS uplink ack/nack") });
        }
        let_field!(buffer, channel_coding_command, 2);
        let_field!(buffer, final_ack, 1);
        let_field!(buffer, starting_sequence_number, 7);
        let_field!(buffer, received_block_bitmap, 64);
        let_field!(buffer, tlli_present, 1);
        let tlli = if tlli_present == 1 {
            let_field!(buffer, tlli, 32);
            Some(tlli as Tlli)
        } else {
            None
        };

        Ok(PacketUplinkAckNack {
            page_mode: page_mode as u8,
            uplink_tfi: uplink_tfi as Tfi,
            channel_coding_command: channel_coding_command as u8,
            final_ack: final_ack == 1,
            starting_sequence_number: starting_sequence_number as u8,
            received_block_bitmap,
            tlli,
        })
    }

    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) {
        buffer.write_bits(DlControlMessageType::PacketUplinkAckNack.into_raw(), 6);
        buffer.write_bits(self.page_mode as u64, 2);
        buffer.write_bits(0, 2);
        buffer.write_bits(self.uplink_tfi as u64, 5);
        buffer.write_bits(0, 1);
        buffer.write_bits(self.channel_coding_command as u64, 2);
        buffer.write_bit(self.final_ack as u8);
        buffer.write_bits(self.starting_sequence_number as u64, 7);
        buffer.write_bits(self.received_block_bitmap, 64);
        match self.tlli {
            Some(tlli) => {
                buffer.write_bit(1);
                buffer.write_bits(tlli as u64, 32);
            }
            None => buffer.write_bit(0),
        }
    }
}

/// Downlink RLC/MAC control block: MAC header (04.60 clause 10.3.1) followed by
/// the control message, padded to a full CS-1 block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlcMacControlBlock {
    /// 2 bits, relative reserved block period
    pub rrbp: u8,
    /// Supplementary/polling bit, RRBP is valid when set
    pub sp: bool,
    /// 3 bits, uplink state flag
    pub usf: u8,
    pub message: PacketUplinkAckNack,
}

impl RlcMacControlBlock {
    /// Final PACKET UPLINK ACK/NACK for the TBF identified by `tfi`, echoing `tlli`
    pub fn new_uplink_ack(tfi: Tfi, tlli: Option<Tlli>) -> Self {
        Self {
            rrbp: 0,
            sp: false,
            usf: 0,
            message: PacketUplinkAckNack {
                page_mode: 0,
                uplink_tfi: tfi,
                channel_coding_command: 0,
                final_ack: true,
                starting_sequence_number: 0,
                received_block_bitmap: u64::MAX,
                tlli,
            },
        }
    }

    pub fn tfi(&self) -> Tfi {
        self.message.uplink_tfi
    }

    pub fn tlli(&self) -> Option<Tlli> {
        self.message.tlli
    }

    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, payload_type, 2);
        expect_value!(payload_type, PayloadType::Control1.into_raw())?;
        let_field!(buffer, rrbp, 2);
        let_field!(buffer, sp, 1);
        let_field!(buffer, usf, 3);
        let message = PacketUplinkAckNack::from_bitbuf(buffer)?;
        Ok(RlcMacControlBlock {
            rrbp: rrbp as u8,
            sp: sp == 1,
            usf: usf as u8,
            message,
        })
    }

    /// Writes the block including spare padding up to the CS-1 block size
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) {
        buffer.write_bits(PayloadType::Control1.into_raw(), 2);
        buffer.write_bits(self.rrbp as u64, 2);
        buffer.write_bit(self.sp as u8);
        buffer.write_bits(self.usf as u64, 3);
        self.message.to_bitbuf(buffer);

        let tail = buffer.get_pos() % 8;
        if tail != 0 {
            buffer.write_zeroes(8 - tail);
        }
        buffer.pad_octets_to(RLCMAC_BLOCK_OCTETS, SPARE_PADDING);
    }

    pub fn from_frame(frame: &RlcMacFrame) -> Result<Self, PduParseErr> {
        Self::from_bitbuf(&mut frame.bitbuf())
    }

    pub fn to_frame(&self) -> RlcMacFrame {
        let mut buf = BitBuffer::new_autoexpand(RLCMAC_BLOCK_OCTETS * 8);
        self.to_bitbuf(&mut buf);
        RlcMacFrame::from(buf)
    }
}

impl fmt::Display for RlcMacControlBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PacketUplinkAckNack {{ tfi: {} final: {} tlli: ", self.message.uplink_tfi, self.message.final_ack)?;
        match self.message.tlli {
            Some(tlli) => write!(f, "{:#010x} }}", tlli),
            None => write!(f, "- }}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use gsm_core::debug;

    use super::*;

    #[test]
    fn test_uplink_ack_layout() {
        debug::setup_logging_verbose();
        let block = RlcMacControlBlock::new_uplink_ack(5, Some(0x12345678));
        let frame = block.to_frame();
        tracing::info!("Encoded: {:?}", frame);

        let bytes = frame.as_bytes();
        assert_eq!(bytes.len(), RLCMAC_BLOCK_OCTETS);
        // Payload type 01, RRBP 0, S/P 0, USF 0
        assert_eq!(bytes[0], 0x40);
        // Message type 001001, page mode 00
        assert_eq!(bytes[1], 0x24);
        // 00, TFI 00101, escape 0
        assert_eq!(bytes[2], 0x0A);
        // CCC 00, FAI 1, SSN 0 spills into the next octet, then the bitmap
        assert_eq!(bytes[3], 0x20);
        assert_eq!(bytes[4], 0x3F);
        assert_eq!(&bytes[5..12], &[0xFF; 7]);
        // Last bitmap bits, TLLI present, TLLI, zero fill to the octet boundary
        assert_eq!(&bytes[12..17], &[0xE2, 0x46, 0x8A, 0xCF, 0x00]);
        assert!(bytes[17..].iter().all(|b| *b == SPARE_PADDING));

        let parsed = RlcMacControlBlock::from_frame(&frame).expect("Failed parsing");
        assert_eq!(parsed, block);
        assert_eq!(parsed.tfi(), 5);
        assert_eq!(parsed.tlli(), Some(0x12345678));
    }

    #[test]
    fn test_uplink_ack_without_tlli() {
        let block = RlcMacControlBlock::new_uplink_ack(31, None);
        let frame = block.to_frame();
        assert_eq!(frame.len(), RLCMAC_BLOCK_OCTETS);
        let parsed = RlcMacControlBlock::from_frame(&frame).unwrap();
        assert_eq!(parsed.tfi(), 31);
        assert_eq!(parsed.tlli(), None);
    }
}
