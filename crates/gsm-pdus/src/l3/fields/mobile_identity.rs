use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, let_field, unimplemented_log};


/// 04.08 clause 10.5.1.4 mobile identity, type of identity
const TYPE_NONE: u64 = 0;
const TYPE_IMSI: u64 = 1;
const TYPE_IMEI: u64 = 2;
const TYPE_IMEISV: u64 = 3;
const TYPE_TMSI: u64 = 4;
const TYPE_TMGI: u64 = 5;

/// Mobile identity IE (LV). Digit identities are kept as strings of decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobileIdentity {
    NoIdentity,
    Imsi(String),
    Imei(String),
    Imeisv(String),
    Tmsi(u32),
}

impl MobileIdentity {
    /// Parse the LV-encoded IE, starting at the length octet
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, mobile_identity_len, 8);
        let len = mobile_identity_len as usize;
        if len == 0 {
            return Err(PduParseErr::InvalidValue { field: "mobile_identity_len", value: 0 });
        }
        if buffer.get_len_remaining() < len * 8 {
            return Err(PduParseErr::BufferEnded { field: Some("mobile_identity") });
        }

        let_field!(buffer, first_digit, 4);
        let_field!(buffer, odd_indicator, 1);
        let_field!(buffer, identity_type, 3);

        match identity_type {
            TYPE_TMSI => {
                if len != 5 {
                    return Err(PduParseErr::InconsistentLength { expected: 5, found: len });
                }
                let_field!(buffer, tmsi, 32);
                Ok(MobileIdentity::Tmsi(tmsi as u32))
            }
            TYPE_IMSI | TYPE_IMEI | TYPE_IMEISV => {
                let num_digits = if odd_indicator == 1 { 2 * len - 1 } else { 2 * len - 2 };
                let mut nibbles = Vec::with_capacity(2 * len);
                nibbles.push(first_digit as u8);
                for _ in 1..len {
                    let octet = buffer.read_field(8, "mobile_identity_digits")? as u8;
                    nibbles.push(octet & 0x0F);
                    nibbles.push(octet >> 4);
                }
                nibbles.truncate(num_digits);
                let digits = digits_to_string(&nibbles, "mobile_identity_digits")?;
                Ok(match identity_type {
                    TYPE_IMSI => MobileIdentity::Imsi(digits),
                    TYPE_IMEI => MobileIdentity::Imei(digits),
                    _ => MobileIdentity::Imeisv(digits),
                })
            }
            TYPE_NONE => {
                // Skip whatever filler the MS put after the type octet
                buffer.read_octets(len - 1, "mobile_identity_filler")?;
                Ok(MobileIdentity::NoIdentity)
            }
            TYPE_TMGI => {
                unimplemented_log!("TMGI mobile identity");
                Err(PduParseErr::NotImplemented { field: Some("mobile_identity_tmgi") })
            }
            _ => Err(PduParseErr::InvalidValue { field: "identity_type", value: identity_type }),
        }
    }

    /// Serialize as LV, including the length octet
    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) -> Result<(), PduParseErr> {
        match self {
            MobileIdentity::NoIdentity => {
                buffer.write_bits(1, 8);
                buffer.write_bits(0xF, 4);
                buffer.write_bits(0, 1);
                buffer.write_bits(TYPE_NONE, 3);
            }
            MobileIdentity::Tmsi(tmsi) => {
                buffer.write_bits(5, 8);
                buffer.write_bits(0xF, 4);
                buffer.write_bits(0, 1);
                buffer.write_bits(TYPE_TMSI, 3);
                buffer.write_bits(*tmsi as u64, 32);
            }
            MobileIdentity::Imsi(digits) => write_digits(buffer, TYPE_IMSI, digits)?,
            MobileIdentity::Imei(digits) => write_digits(buffer, TYPE_IMEI, digits)?,
            MobileIdentity::Imeisv(digits) => write_digits(buffer, TYPE_IMEISV, digits)?,
        }
        Ok(())
    }

    pub fn is_tmsi(&self) -> bool {
        matches!(self, MobileIdentity::Tmsi(_))
    }
}

fn digits_to_string(nibbles: &[u8], field: &'static str) -> Result<String, PduParseErr> {
    let mut s = String::with_capacity(nibbles.len());
    for &d in nibbles {
        if d > 9 {
            return Err(PduParseErr::InvalidValue { field, value: d as u64 });
        }
        s.push((b'0' + d) as char);
    }
    Ok(s)
}

fn write_digits(buffer: &mut BitBuffer, identity_type: u64, digits: &str) -> Result<(), PduParseErr> {
    let nibbles: Vec<u64> = digits
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u64))
        .collect::<Option<Vec<u64>>>()
        .ok_or(PduParseErr::Inconsistency { field: "mobile_identity_digits", reason: "non-decimal digit" })?;
    if nibbles.is_empty() {
        return Err(PduParseErr::Inconsistency { field: "mobile_identity_digits", reason: "empty identity" });
    }

    let odd = nibbles.len() % 2 == 1;
    let len = nibbles.len() / 2 + 1;
    buffer.write_bits(len as u64, 8);
    buffer.write_bits(nibbles[0], 4);
    buffer.write_bits(odd as u64, 1);
    buffer.write_bits(identity_type, 3);
    for pair in nibbles[1..].chunks(2) {
        let hi = if pair.len() == 2 { pair[1] } else { 0xF };
        buffer.write_bits(hi, 4);
        buffer.write_bits(pair[0], 4);
    }
    Ok(())
}

impl fmt::Display for MobileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobileIdentity::NoIdentity => write!(f, "none"),
            MobileIdentity::Imsi(d) => write!(f, "IMSI{}", d),
            MobileIdentity::Imei(d) => write!(f, "IMEI{}", d),
            MobileIdentity::Imeisv(d) => write!(f, "IMEISV{}", d),
            MobileIdentity::Tmsi(t) => write!(f, "TMSI{:#010x}", t),
        }
    }
}
