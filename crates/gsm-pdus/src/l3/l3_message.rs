use core::fmt;

use gsm_core::{BitBuffer, PduParseErr, let_field};
use gsm_saps::L3Frame;

use crate::l3::enums::mm_message_type::MmMessageType;
use crate::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use crate::l3::enums::rr_message_type::RrMessageType;
use crate::l3::pdus::assignment_complete::AssignmentComplete;
use crate::l3::pdus::cm_service_request::CmServiceRequest;
use crate::l3::pdus::gprs_suspension_request::GprsSuspensionRequest;
use crate::l3::pdus::imsi_detach_indication::ImsiDetachIndication;
use crate::l3::pdus::location_updating_request::LocationUpdatingRequest;
use crate::l3::pdus::paging_response::PagingResponse;


/// First two octets of every L3 message: skip indicator or transaction identifier,
/// protocol discriminator and message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L3Header {
    /// Skip indicator for RR/MM, transaction identifier for CC/SS/SMS
    pub ti_or_skip: u8,
    pub pd: u8,
    /// Message type octet as received, including any sequence number bits
    pub mti: u8,
}

impl L3Header {
    pub fn new(pd: ProtocolDiscriminator, mti: u8) -> Self {
        Self { ti_or_skip: 0, pd: pd.into_raw() as u8, mti }
    }

    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, ti_or_skip, 4);
        let_field!(buffer, pd, 4);
        let_field!(buffer, mti, 8);
        Ok(L3Header { ti_or_skip: ti_or_skip as u8, pd: pd as u8, mti: mti as u8 })
    }

    pub fn to_bitbuf(&self, buffer: &mut BitBuffer) {
        buffer.write_bits(self.ti_or_skip as u64, 4);
        buffer.write_bits(self.pd as u64, 4);
        buffer.write_bits(self.mti as u64, 8);
    }

    pub fn protocol(&self) -> Option<ProtocolDiscriminator> {
        ProtocolDiscriminator::try_from(self.pd as u64).ok()
    }

    /// Message type with the N(SD) bits removed for protocols that carry them
    pub fn message_type(&self) -> u8 {
        match self.protocol() {
            Some(ProtocolDiscriminator::MobilityManagement)
            | Some(ProtocolDiscriminator::CallControl)
            | Some(ProtocolDiscriminator::NonCallSs) => self.mti & MmMessageType::MASK,
            _ => self.mti,
        }
    }
}

/// Mobility management messages the control plane routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MmMessage {
    LocationUpdatingRequest(LocationUpdatingRequest),
    ImsiDetachIndication(ImsiDetachIndication),
    CmServiceRequest(CmServiceRequest),
    /// Well-formed header with a message type that is not routed here
    Other { mti: u8 },
}

/// Radio resource messages the control plane routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RrMessage {
    PagingResponse(PagingResponse),
    AssignmentComplete(AssignmentComplete),
    GprsSuspensionRequest(GprsSuspensionRequest),
    Other { mti: u8 },
}

/// A decoded uplink L3 message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum L3Message {
    Mm(MmMessage),
    Rr(RrMessage),
    Other { pd: u8, mti: u8 },
}

impl L3Message {
    /// Decode a frame. Unknown message types decode to the `Other` variants;
    /// only malformed or truncated frames produce an error.
    pub fn from_frame(frame: &L3Frame) -> Result<Self, PduParseErr> {
        let mut buffer = frame.bitbuf();
        let hdr = L3Header::from_bitbuf(&mut buffer)?;
        buffer.seek(0);
        let mti = hdr.message_type();

        match hdr.protocol() {
            Some(ProtocolDiscriminator::MobilityManagement) => {
                let msg = match MmMessageType::try_from(mti as u64) {
                    Ok(MmMessageType::LocationUpdatingRequest) =>
                        MmMessage::LocationUpdatingRequest(LocationUpdatingRequest::from_bitbuf(&mut buffer)?),
                    Ok(MmMessageType::ImsiDetachIndication) =>
                        MmMessage::ImsiDetachIndication(ImsiDetachIndication::from_bitbuf(&mut buffer)?),
                    Ok(MmMessageType::CmServiceRequest) =>
                        MmMessage::CmServiceRequest(CmServiceRequest::from_bitbuf(&mut buffer)?),
                    _ => MmMessage::Other { mti },
                };
                Ok(L3Message::Mm(msg))
            }
            Some(ProtocolDiscriminator::RadioResource) => {
                let msg = match RrMessageType::try_from(mti as u64) {
                    Ok(RrMessageType::PagingResponse) =>
                        RrMessage::PagingResponse(PagingResponse::from_bitbuf(&mut buffer)?),
                    Ok(RrMessageType::AssignmentComplete) =>
                        RrMessage::AssignmentComplete(AssignmentComplete::from_bitbuf(&mut buffer)?),
                    Ok(RrMessageType::GprsSuspensionRequest) =>
                        RrMessage::GprsSuspensionRequest(GprsSuspensionRequest::from_bitbuf(&mut buffer)?),
                    _ => RrMessage::Other { mti },
                };
                Ok(L3Message::Rr(msg))
            }
            _ => Ok(L3Message::Other { pd: hdr.pd, mti }),
        }
    }

    pub fn pd(&self) -> u8 {
        match self {
            L3Message::Mm(_) => ProtocolDiscriminator::MobilityManagement.into_raw() as u8,
            L3Message::Rr(_) => ProtocolDiscriminator::RadioResource.into_raw() as u8,
            L3Message::Other { pd, .. } => *pd,
        }
    }

    pub fn mti(&self) -> u8 {
        match self {
            L3Message::Mm(m) => m.mti(),
            L3Message::Rr(m) => m.mti(),
            L3Message::Other { mti, .. } => *mti,
        }
    }
}

impl MmMessage {
    pub fn mti(&self) -> u8 {
        let t = match self {
            MmMessage::LocationUpdatingRequest(_) => MmMessageType::LocationUpdatingRequest,
            MmMessage::ImsiDetachIndication(_) => MmMessageType::ImsiDetachIndication,
            MmMessage::CmServiceRequest(_) => MmMessageType::CmServiceRequest,
            MmMessage::Other { mti } => return *mti,
        };
        t.into_raw() as u8
    }
}

impl RrMessage {
    pub fn mti(&self) -> u8 {
        let t = match self {
            RrMessage::PagingResponse(_) => RrMessageType::PagingResponse,
            RrMessage::AssignmentComplete(_) => RrMessageType::AssignmentComplete,
            RrMessage::GprsSuspensionRequest(_) => RrMessageType::GprsSuspensionRequest,
            RrMessage::Other { mti } => return *mti,
        };
        t.into_raw() as u8
    }
}

impl fmt::Display for MmMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmMessage::LocationUpdatingRequest(m) => write!(f, "{}", m),
            MmMessage::ImsiDetachIndication(m) => write!(f, "{}", m),
            MmMessage::CmServiceRequest(m) => write!(f, "{}", m),
            MmMessage::Other { mti } => match MmMessageType::try_from(*mti as u64) {
                Ok(t) => write!(f, "MM {}", t),
                Err(_) => write!(f, "MM type {:#04x}", mti),
            },
        }
    }
}

impl fmt::Display for RrMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RrMessage::PagingResponse(m) => write!(f, "{}", m),
            RrMessage::AssignmentComplete(m) => write!(f, "{}", m),
            RrMessage::GprsSuspensionRequest(m) => write!(f, "{}", m),
            RrMessage::Other { mti } => match RrMessageType::try_from(*mti as u64) {
                Ok(t) => write!(f, "RR {}", t),
                Err(_) => write!(f, "RR type {:#04x}", mti),
            },
        }
    }
}

impl fmt::Display for L3Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            L3Message::Mm(m) => write!(f, "{}", m),
            L3Message::Rr(m) => write!(f, "{}", m),
            L3Message::Other { pd, mti } => match ProtocolDiscriminator::try_from(*pd as u64) {
                Ok(p) => write!(f, "{} type {:#04x}", p, mti),
                Err(_) => write!(f, "PD {} type {:#04x}", pd, mti),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use gsm_core::debug;

    use super::*;

    fn decode(hex: &str) -> Result<L3Message, PduParseErr> {
        let buf = BitBuffer::from_hexstr(hex).unwrap();
        L3Message::from_frame(&L3Frame::from(buf))
    }

    #[test]
    fn test_route_by_pd() {
        debug::setup_logging_verbose();

        let msg = decode("05 08 72 00 F1 10 03 E8 33 05 F4 01 02 03 04").unwrap();
        tracing::info!("Decoded: {}", msg);
        assert!(matches!(msg, L3Message::Mm(MmMessage::LocationUpdatingRequest(_))));
        assert_eq!(msg.pd(), 5);
        assert_eq!(msg.mti(), 0x08);

        let msg = decode("06 29 00").unwrap();
        assert_eq!(msg, L3Message::Rr(RrMessage::AssignmentComplete(AssignmentComplete { rr_cause: 0 })));

        // CC SETUP, not routed by the control plane
        let msg = decode("03 45 04 04 60 04 02").unwrap();
        assert_eq!(msg, L3Message::Other { pd: 3, mti: 0x05 });
    }

    #[test]
    fn test_unrouted_types_are_other() {
        // MM STATUS
        assert_eq!(decode("05 31 62").unwrap(), L3Message::Mm(MmMessage::Other { mti: 0x31 }));
        // Unassigned MM type
        assert_eq!(decode("05 3E").unwrap(), L3Message::Mm(MmMessage::Other { mti: 0x3E }));
        // MEASUREMENT REPORT
        assert_eq!(decode("06 15 00 00 00").unwrap(), L3Message::Rr(RrMessage::Other { mti: 0x15 }));
    }

    #[test]
    fn test_malformed_frames() {
        assert!(decode("").is_err());
        assert!(decode("05").is_err());
        // Location updating request cut short inside the LAI
        assert!(decode("05 08 72 00 F1").is_err());
    }
}
