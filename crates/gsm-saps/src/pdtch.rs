use core::fmt;

use gsm_core::BitBuffer;


/// Raw octets of one RLC/MAC block on a packet data channel
#[derive(Clone, PartialEq, Eq)]
pub struct RlcMacFrame {
    data: Vec<u8>,
}

impl RlcMacFrame {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        Self { data: data.to_vec() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bitbuf(&self) -> BitBuffer {
        BitBuffer::from_bytes(&self.data)
    }
}

impl From<BitBuffer> for RlcMacFrame {
    fn from(buf: BitBuffer) -> Self {
        Self { data: buf.to_octets() }
    }
}

impl fmt::Debug for RlcMacFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RlcMacFrame(")?;
        for b in &self.data {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}
