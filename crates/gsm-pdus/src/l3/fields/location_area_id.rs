use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, let_field};


/// 04.08 clause 10.5.1.3 location area identification (V, 5 octets)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationAreaId {
    /// Three decimal digits
    pub mcc: String,
    /// Two or three decimal digits
    pub mnc: String,
    pub lac: u16,
}

impl LocationAreaId {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, mcc2, 4);
        let_field!(buffer, mcc1, 4);
        let_field!(buffer, mnc3, 4);
        let_field!(buffer, mcc3, 4);
        let_field!(buffer, mnc2, 4);
        let_field!(buffer, mnc1, 4);
        let_field!(buffer, lac, 16);

        let mut mcc = String::with_capacity(3);
        for d in [mcc1, mcc2, mcc3] {
            push_bcd_digit(&mut mcc, d, "mcc")?;
        }
        let mut mnc = String::with_capacity(3);
        for d in [mnc1, mnc2] {
            push_bcd_digit(&mut mnc, d, "mnc")?;
        }
        if mnc3 != 0xF {
            push_bcd_digit(&mut mnc, mnc3, "mnc")?;
        }

        Ok(LocationAreaId { mcc, mnc, lac: lac as u16 })
    }

    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        let mcc = bcd_digits(&self.mcc, "mcc")?;
        let mnc = bcd_digits(&self.mnc, "mnc")?;
        if mcc.len() != 3 {
            return Err(PduParseErr::InconsistentLength { expected: 3, found: mcc.len() });
        }
        if mnc.len() != 2 && mnc.len() != 3 {
            return Err(PduParseErr::InconsistentLength { expected: 3, found: mnc.len() });
        }
        let mnc3 = mnc.get(2).copied().unwrap_or(0xF);

        buffer.write_bits(mcc[1], 4);
        buffer.write_bits(mcc[0], 4);
        buffer.write_bits(mnc3, 4);
        buffer.write_bits(mcc[2], 4);
        buffer.write_bits(mnc[1], 4);
        buffer.write_bits(mnc[0], 4);
        buffer.write_bits(self.lac as u64, 16);
        Ok(())
    }
}

fn push_bcd_digit(s: &mut String, digit: u64, field: &'static str) -> Result<(), PduParseErr> {
    if digit > 9 {
        return Err(PduParseErr::InvalidValue { field, value: digit });
    }
    s.push((b'0' + digit as u8) as char);
    Ok(())
}

fn bcd_digits(s: &str, field: &'static str) -> Result<Vec<u64>, PduParseErr> {
    s.chars()
        .map(|c| c.to_digit(10).map(|d| d as u64))
        .collect::<Option<Vec<u64>>>()
        .ok_or(PduParseErr::Inconsistency { field, reason: "non-decimal digit" })
}

impl fmt::Display for LocationAreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.mcc, self.mnc, self.lac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_mnc() {
        // MCC 001, MNC 01, LAC 0x03E8
        let mut buf = BitBuffer::from_hexstr("00 F1 10 03 E8").unwrap();
        let lai = LocationAreaId::from_bitbuf(&mut buf).expect("Failed parsing");
        assert_eq!(lai.mcc, "001");
        assert_eq!(lai.mnc, "01");
        assert_eq!(lai.lac, 1000);
        assert_eq!(lai.to_string(), "001-01-1000");

        let mut buf_out = BitBuffer::new_autoexpand(40);
        lai.to_bitbuf(&mut buf_out).unwrap();
        assert_eq!(buf_out.dump_hex(), "00F11003E8");
    }

    #[test]
    fn test_three_digit_mnc() {
        // MCC 310, MNC 410
        let mut buf = BitBuffer::from_hexstr("13 00 14 00 01").unwrap();
        let lai = LocationAreaId::from_bitbuf(&mut buf).unwrap();
        assert_eq!(lai.mcc, "310");
        assert_eq!(lai.mnc, "410");
        assert_eq!(lai.lac, 1);
    }
}
