/// 04.60 clause 11.2.0.1, downlink RLC/MAC control message types
/// Bits: 6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DlControlMessageType {
    PacketAccessReject = 0b100001,
    PacketDownlinkAssignment = 0b000010,
    PacketPollingRequest = 0b000100,
    PacketTbfRelease = 0b001000,
    PacketUplinkAckNack = 0b001001,
    PacketUplinkAssignment = 0b001010,
}

impl std::convert::TryFrom<u64> for DlControlMessageType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0b100001 => Ok(DlControlMessageType::PacketAccessReject),
            0b000010 => Ok(DlControlMessageType::PacketDownlinkAssignment),
            0b000100 => Ok(DlControlMessageType::PacketPollingRequest),
            0b001000 => Ok(DlControlMessageType::PacketTbfRelease),
            0b001001 => Ok(DlControlMessageType::PacketUplinkAckNack),
            0b001010 => Ok(DlControlMessageType::PacketUplinkAssignment),
            _ => Err(()),
        }
    }
}

impl DlControlMessageType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<DlControlMessageType> for u64 {
    fn from(e: DlControlMessageType) -> Self { e.into_raw() }
}

impl core::fmt::Display for DlControlMessageType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DlControlMessageType::PacketAccessReject => write!(f, "PacketAccessReject"),
            DlControlMessageType::PacketDownlinkAssignment => write!(f, "PacketDownlinkAssignment"),
            DlControlMessageType::PacketPollingRequest => write!(f, "PacketPollingRequest"),
            DlControlMessageType::PacketTbfRelease => write!(f, "PacketTbfRelease"),
            DlControlMessageType::PacketUplinkAckNack => write!(f, "PacketUplinkAckNack"),
            DlControlMessageType::PacketUplinkAssignment => write!(f, "PacketUplinkAssignment"),
        }
    }
}

/// 04.60 clause 11.2.0.2, uplink RLC/MAC control message types
/// Bits: 6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UlControlMessageType {
    PacketCellChangeFailure = 0b000000,
    PacketControlAcknowledgement = 0b000001,
    PacketDownlinkAckNack = 0b000010,
    PacketUplinkDummyControlBlock = 0b000011,
    PacketMeasurementReport = 0b000100,
    PacketResourceRequest = 0b000101,
    PacketMobileTbfStatus = 0b000110,
}

impl std::convert::TryFrom<u64> for UlControlMessageType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0b000000 => Ok(UlControlMessageType::PacketCellChangeFailure),
            0b000001 => Ok(UlControlMessageType::PacketControlAcknowledgement),
            0b000010 => Ok(UlControlMessageType::PacketDownlinkAckNack),
            0b000011 => Ok(UlControlMessageType::PacketUplinkDummyControlBlock),
            0b000100 => Ok(UlControlMessageType::PacketMeasurementReport),
            0b000101 => Ok(UlControlMessageType::PacketResourceRequest),
            0b000110 => Ok(UlControlMessageType::PacketMobileTbfStatus),
            _ => Err(()),
        }
    }
}

impl UlControlMessageType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<UlControlMessageType> for u64 {
    fn from(e: UlControlMessageType) -> Self { e.into_raw() }
}

impl core::fmt::Display for UlControlMessageType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UlControlMessageType::PacketCellChangeFailure => write!(f, "PacketCellChangeFailure"),
            UlControlMessageType::PacketControlAcknowledgement => write!(f, "PacketControlAcknowledgement"),
            UlControlMessageType::PacketDownlinkAckNack => write!(f, "PacketDownlinkAckNack"),
            UlControlMessageType::PacketUplinkDummyControlBlock => write!(f, "PacketUplinkDummyControlBlock"),
            UlControlMessageType::PacketMeasurementReport => write!(f, "PacketMeasurementReport"),
            UlControlMessageType::PacketResourceRequest => write!(f, "PacketResourceRequest"),
            UlControlMessageType::PacketMobileTbfStatus => write!(f, "PacketMobileTbfStatus"),
        }
    }
}
