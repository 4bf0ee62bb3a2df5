use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, Tfi, Tlli, expect_value, let_field};
use gsm_saps::RlcMacFrame;

use crate::rlcmac::enums::payload_type::PayloadType;


/// Uplink RLC data block with its MAC header (04.60 clause 10.2.2, 10.3a).
/// Octet 1: payload type, countdown value, stall indicator, retry.
/// Octet 2: spare, PFI indicator, TFI, TLLI indicator.
/// Octet 3: BSN, extension bit, followed by the optional length indicators, TLLI and PFI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlcMacDataBlock {
    /// 4 bits, 0 marks the last block of the TBF
    pub cv: u8,
    pub si: bool,
    pub retry: bool,
    /// 5 bits
    pub tfi: Tfi,
    /// 7 bits, block sequence number
    pub bsn: u8,
    /// Raw length indicator octets, each with its own M and E bits.
    /// The encoder sets E on the last octet and clears it on the others.
    pub length_indicators: Vec<u8>,
    /// Present during contention resolution (TI = 1)
    pub tlli: Option<Tlli>,
    /// 7 bits, packet flow identifier (PI = 1)
    pub pfi: Option<u8>,
    pub payload: Vec<u8>,
}

impl RlcMacDataBlock {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, payload_type, 2);
        expect_value!(payload_type, PayloadType::Data.into_raw())?;
        let_field!(buffer, cv, 4);
        let_field!(buffer, si, 1);
        let_field!(buffer, retry, 1);

        let_field!(buffer, _spare, 1);
        let_field!(buffer, pi, 1);
        let_field!(buffer, tfi, 5);
        let_field!(buffer, ti, 1);

        let_field!(buffer, bsn, 7);
        let_field!(buffer, e, 1);

        let mut length_indicators = Vec::new();
        if e == 0 {
            loop {
                let_field!(buffer, length_indicator, 8);
                length_indicators.push(length_indicator as u8);
                if length_indicator & 1 == 1 {
                    break;
                }
            }
        }

        let tlli = if ti == 1 {
            let_field!(buffer, tlli, 32);
            Some(tlli as Tlli)
        } else {
            None
        };

        let pfi = if pi == 1 {
            let_field!(buffer, pfi, 7);
            let_field!(buffer, _pfi_e, 1);
            Some(pfi as u8)
        } else {
            None
        };

        let payload = buffer.read_octets(buffer.get_len_remaining() / 8, "payload")?;

        Ok(RlcMacDataBlock {
            cv: cv as u8,
            si: si == 1,
            retry: retry == 1,
            tfi: tfi as Tfi,
            bsn: bsn as u8,
            length_indicators,
            tlli,
            pfi,
            payload,
        })
    }

    /// Serialize into the given BitBuffer. Fields wider than their on-air size are truncated.
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) {
        buffer.write_bits(PayloadType::Data.into_raw(), 2);
        buffer.write_bits((self.cv & 0x0F) as u64, 4);
        buffer.write_bit(self.si as u8);
        buffer.write_bit(self.retry as u8);

        buffer.write_bits(0, 1);
        buffer.write_bit(self.pfi.is_some() as u8);
        buffer.write_bits((self.tfi & 0x1F) as u64, 5);
        buffer.write_bit(self.tlli.is_some() as u8);

        buffer.write_bits((self.bsn & 0x7F) as u64, 7);
        buffer.write_bit(self.length_indicators.is_empty() as u8);
        let last = self.length_indicators.len().saturating_sub(1);
        for (i, li) in self.length_indicators.iter().enumerate() {
            // E = 1 terminates the LI chain
            buffer.write_bits(((li & 0xFE) | (i == last) as u8) as u64, 8);
        }

        if let Some(tlli) = self.tlli {
            buffer.write_bits(tlli as u64, 32);
        }
        if let Some(pfi) = self.pfi {
            buffer.write_bits((pfi & 0x7F) as u64, 7);
            buffer.write_bits(1, 1);
        }
        buffer.write_octets(&self.payload);
    }

    pub fn from_frame(frame: &RlcMacFrame) -> Result<Self, PduParseErr> {
        Self::from_bitbuf(&mut frame.bitbuf())
    }

    pub fn to_frame(&self) -> RlcMacFrame {
        let mut buf = BitBuffer::new_autoexpand(23 * 8);
        self.to_bitbuf(&mut buf);
        RlcMacFrame::from(buf)
    }

    /// Last block of the uplink TBF
    pub fn is_final(&self) -> bool {
        self.cv == 0
    }
}

impl fmt::Display for RlcMacDataBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RlcMacDataBlock {{ tfi: {} cv: {} bsn: {} tlli: ", self.tfi, self.cv, self.bsn)?;
        match self.tlli {
            Some(tlli) => write!(f, "{:#010x}", tlli)?,
            None => write!(f, "-")?,
        }
        write!(f, " len: {} }}", self.payload.len())
    }
}

#[cfg(test)]
mod tests {
    use gsm_core::debug;

    use super::*;

    #[test]
    fn test_data_block_with_tlli() {
        debug::setup_logging_verbose();
        // CV 0, TFI 5, TI 1, BSN 3, no LI, TLLI 0x12345678, two payload octets
        let frame = RlcMacFrame::from_bytes(&[0x00, 0x0B, 0x07, 0x12, 0x34, 0x56, 0x78, 0xAA, 0xBB]);
        let block = RlcMacDataBlock::from_frame(&frame).expect("Failed parsing");
        tracing::info!("Parsed: {}", block);

        assert_eq!(block.cv, 0);
        assert_eq!(block.tfi, 5);
        assert_eq!(block.bsn, 3);
        assert_eq!(block.tlli, Some(0x12345678));
        assert!(block.length_indicators.is_empty());
        assert_eq!(block.payload, vec![0xAA, 0xBB]);
        assert!(block.is_final());

        assert_eq!(block.to_frame(), frame);
    }

    #[test]
    fn test_data_block_with_length_indicators() {
        // CV 15, TFI 31, no TLLI, BSN 0 with E = 0, two LI octets
        let frame = RlcMacFrame::from_bytes(&[0x3C, 0x3E, 0x00, 0x0A, 0x15, 0x01, 0x02]);
        let block = RlcMacDataBlock::from_frame(&frame).unwrap();
        assert_eq!(block.cv, 15);
        assert_eq!(block.tfi, 31);
        assert_eq!(block.tlli, None);
        assert_eq!(block.length_indicators, vec![0x0A, 0x15]);
        assert_eq!(block.payload, vec![0x01, 0x02]);
        assert_eq!(block.to_frame(), frame);
    }

    #[test]
    fn test_truncated_tlli() {
        let frame = RlcMacFrame::from_bytes(&[0x00, 0x0B, 0x07, 0x12]);
        assert!(matches!(
            RlcMacDataBlock::from_frame(&frame),
            Err(PduParseErr::BufferEnded { field: Some("tlli") })
        ));
    }

    #[test]
    fn test_length_indicator_chain_terminated_on_encode() {
        debug::setup_logging_verbose();
        // LI for 10 octets given without the E bit, followed by a TLLI
        let block = RlcMacDataBlock {
            cv: 0,
            si: false,
            retry: false,
            tfi: 5,
            bsn: 9,
            length_indicators: vec![0x28],
            tlli: Some(0x12345678),
            pfi: None,
            payload: vec![0x11; 10],
        };
        let frame = block.to_frame();
        assert_eq!(&frame.as_bytes()[..8], &[0x00, 0x0B, 0x12, 0x29, 0x12, 0x34, 0x56, 0x78]);

        let parsed = RlcMacDataBlock::from_frame(&frame).expect("Failed parsing");
        assert_eq!(parsed.length_indicators, vec![0x29]);
        assert_eq!(parsed.tlli, Some(0x12345678));
        assert_eq!(parsed.payload, vec![0x11; 10]);

        // Intermediate LIs lose a stray E bit
        let block = RlcMacDataBlock { length_indicators: vec![0x0B, 0x15], tlli: None, ..block };
        let parsed = RlcMacDataBlock::from_frame(&block.to_frame()).unwrap();
        assert_eq!(parsed.length_indicators, vec![0x0A, 0x15]);
        assert_eq!(parsed.payload, vec![0x11; 10]);
    }

    #[test]
    fn test_oversized_fields_are_truncated() {
        let block = RlcMacDataBlock {
            cv: 0x1F,
            si: false,
            retry: false,
            tfi: 0x25,
            bsn: 0x80,
            length_indicators: vec![],
            tlli: None,
            pfi: Some(0xFF),
            payload: vec![],
        };
        let parsed = RlcMacDataBlock::from_frame(&block.to_frame()).unwrap();
        assert_eq!(parsed.cv, 0x0F);
        assert_eq!(parsed.tfi, 0x05);
        assert_eq!(parsed.bsn, 0);
        assert_eq!(parsed.pfi, Some(0x7F));
    }
}
