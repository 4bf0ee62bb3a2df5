use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, let_field};


/// 04.08 clause 10.5.1.5 mobile station classmark 1 (V, 1 octet)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classmark1 {
    /// 2 bits, 0 = phase 1
    pub revision_level: u8,
    /// Controlled early classmark sending
    pub es_ind: bool,
    /// Set when A5/1 is NOT available
    pub a5_1_unavailable: bool,
    /// 3 bits, power class minus one
    pub rf_power_capability: u8,
}

impl Classmark1 {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, _spare, 1);
        let_field!(buffer, revision_level, 2);
        let_field!(buffer, es_ind, 1);
        let_field!(buffer, a5_1, 1);
        let_field!(buffer, rf_power_capability, 3);
        Ok(Classmark1 {
            revision_level: revision_level as u8,
            es_ind: es_ind == 1,
            a5_1_unavailable: a5_1 == 1,
            rf_power_capability: rf_power_capability as u8,
        })
    }

    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) {
        buffer.write_bits(0, 1);
        buffer.write_bits(self.revision_level as u64, 2);
        buffer.write_bit(self.es_ind as u8);
        buffer.write_bit(self.a5_1_unavailable as u8);
        buffer.write_bits(self.rf_power_capability as u64, 3);
    }
}

/// 04.08 clause 10.5.1.6 mobile station classmark 2 (LV, 3 octets of content)
/// The first content octet has the classmark 1 layout; the rest is kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classmark2 {
    pub base: Classmark1,
    pub capabilities: Vec<u8>,
}

impl Classmark2 {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, classmark2_len, 8);
        if classmark2_len == 0 {
            return Err(PduParseErr::InvalidValue { field: "classmark2_len", value: 0 });
        }
        let base = Classmark1::from_bitbuf(buffer)?;
        let capabilities = buffer.read_octets(classmark2_len as usize - 1, "classmark2")?;
        Ok(Classmark2 { base, capabilities })
    }

    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) {
        buffer.write_bits(1 + self.capabilities.len() as u64, 8);
        self.base.to_bitbuf(buffer);
        buffer.write_octets(&self.capabilities);
    }
}

impl fmt::Display for Classmark1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rev={} power={} A5/1={}",
            self.revision_level,
            self.rf_power_capability + 1,
            !self.a5_1_unavailable,
        )
    }
}
