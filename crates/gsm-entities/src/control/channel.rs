use std::ops::Deref;
use std::time::{Duration, Instant};

use gsm_core::{ChannelDesc, ChannelType};
use gsm_pdus::l3::L3Message;
use gsm_saps::{L3Frame, LapdmPrim, Primitive, RlcMacFrame};

use super::errors::ControlErr;


/// A dedicated signaling channel as seen from layer 3: LAPDm primitives in and out.
pub trait LogicalChannel: Send + Sync {
    fn desc(&self) -> ChannelDesc;

    /// LAPDm T200 of this channel
    fn t200(&self) -> Duration;

    /// Next primitive from the data link. Blocks up to `timeout`, or forever when None.
    /// Returns None on timeout.
    fn recv_prim(&self, timeout: Option<Duration>) -> Option<LapdmPrim>;

    fn send_prim(&self, prim: LapdmPrim);

    fn chan_type(&self) -> ChannelType {
        self.desc().chan_type
    }

    /// How long a message pull waits: N200 retransmissions of T200 each
    fn read_timeout(&self) -> Duration {
        self.t200() * self.chan_type().n200()
    }

    /// Block until `primitive` arrives. Other primitives, and any payload they carry, are discarded.
    fn wait_for_primitive(&self, primitive: Primitive, timeout: Option<Duration>) -> Result<(), ControlErr> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            let remaining = match deadline {
                Some(d) => {
                    let now = Instant::now();
                    if now >= d {
                        return Err(ControlErr::read_timeout());
                    }
                    Some(d - now)
                }
                None => None,
            };
            let Some(prim) = self.recv_prim(remaining) else {
                return Err(ControlErr::read_timeout());
            };
            if prim.primitive == primitive {
                return Ok(());
            }
            tracing::debug!(chan=%self.desc(), "discarding {} while waiting for {}", prim, primitive);
        }
    }

    /// Pull the next L3 message, waiting at most `read_timeout()`
    fn recv_l3(&self) -> Result<L3Message, ControlErr> {
        let Some(prim) = self.recv_prim(Some(self.read_timeout())) else {
            return Err(ControlErr::read_timeout());
        };
        if prim.primitive != Primitive::Data {
            return Err(ControlErr::UnexpectedPrimitive { primitive: prim.primitive, transaction_id: None });
        }
        let Some(frame) = prim.sdu else {
            tracing::warn!(chan=%self.desc(), "DATA primitive without payload");
            return Err(ControlErr::unsupported());
        };
        match L3Message::from_frame(&frame) {
            Ok(msg) => {
                tracing::debug!(chan=%self.desc(), "<- {}", msg);
                Ok(msg)
            }
            Err(e) => {
                tracing::warn!(chan=%self.desc(), "Failed parsing L3 frame: {} {:?}", e, frame);
                Err(ControlErr::unsupported())
            }
        }
    }

    fn send_l3(&self, frame: L3Frame) {
        tracing::debug!(chan=%self.desc(), "-> {:?}", frame);
        self.send_prim(LapdmPrim::data(frame));
    }
}

/// Channel handle proven to carry dedicated-signaling procedures
#[derive(Clone, Copy)]
pub struct SdcchChannel<'a> {
    chan: &'a dyn LogicalChannel,
}

impl<'a> SdcchChannel<'a> {
    pub fn narrow(chan: &'a dyn LogicalChannel) -> Option<Self> {
        chan.chan_type().is_dedicated_signaling().then_some(Self { chan })
    }
}

impl<'a> Deref for SdcchChannel<'a> {
    type Target = dyn LogicalChannel + 'a;
    fn deref(&self) -> &Self::Target {
        self.chan
    }
}

/// Channel handle proven to be the FACCH of a traffic channel
#[derive(Clone, Copy)]
pub struct TchChannel<'a> {
    chan: &'a dyn LogicalChannel,
}

impl<'a> TchChannel<'a> {
    pub fn narrow(chan: &'a dyn LogicalChannel) -> Option<Self> {
        chan.chan_type().is_traffic().then_some(Self { chan })
    }
}

impl<'a> Deref for TchChannel<'a> {
    type Target = dyn LogicalChannel + 'a;
    fn deref(&self) -> &Self::Target {
        self.chan
    }
}

/// A packet data traffic channel carrying RLC/MAC blocks
pub trait PacketChannel: Send + Sync {
    fn desc(&self) -> ChannelDesc;

    /// Next uplink block. Blocks for at most one poll interval; None is a poll miss.
    fn recv_rlcmac(&self) -> Option<RlcMacFrame>;

    fn send_rlcmac(&self, frame: RlcMacFrame);
}
