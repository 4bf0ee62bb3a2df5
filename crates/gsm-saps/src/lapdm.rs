use core::fmt;

use gsm_core::BitBuffer;


/// LAPDm service primitives as seen by layer 3 (GSM 04.06 clause 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// DL-ESTABLISH, multiframe operation set up by the MS
    Establish,
    /// DL-DATA, acknowledged information transfer
    Data,
    /// DL-UNIT-DATA, unacknowledged information transfer
    UnitData,
    /// DL-RELEASE, normal release of multiframe operation
    Release,
    /// MDL-RELEASE, local release without signaling
    HardRelease,
    /// MDL-ERROR, unrecoverable data link error
    Error,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Establish => write!(f, "ESTABLISH"),
            Primitive::Data => write!(f, "DATA"),
            Primitive::UnitData => write!(f, "UNIT_DATA"),
            Primitive::Release => write!(f, "RELEASE"),
            Primitive::HardRelease => write!(f, "HARDRELEASE"),
            Primitive::Error => write!(f, "ERROR"),
        }
    }
}

/// Raw octets of one layer 3 message
#[derive(Clone, PartialEq, Eq)]
pub struct L3Frame {
    data: Vec<u8>,
}

impl L3Frame {
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

    /// Fresh read cursor over the frame contents
    pub fn bitbuf(&self) -> BitBuffer {
        BitBuffer::from_bytes(&self.data)
    }
}

impl From<BitBuffer> for L3Frame {
    fn from(buf: BitBuffer) -> Self {
        Self { data: buf.to_octets() }
    }
}

impl fmt::Debug for L3Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L3Frame(")?;
        for b in &self.data {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

/// One primitive passed between LAPDm and layer 3, with its payload if it carries one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LapdmPrim {
    pub primitive: Primitive,
    pub sdu: Option<L3Frame>,
}

impl LapdmPrim {
    pub fn new(primitive: Primitive) -> Self {
        Self { primitive, sdu: None }
    }

    pub fn data(sdu: L3Frame) -> Self {
        Self { primitive: Primitive::Data, sdu: Some(sdu) }
    }
}

impl fmt::Display for LapdmPrim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sdu {
            Some(sdu) => write!(f, "{} {:?}", self.primitive, sdu),
            None => write!(f, "{}", self.primitive),
        }
    }
}
