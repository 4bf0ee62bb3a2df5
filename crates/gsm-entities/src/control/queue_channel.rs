use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use gsm_core::ChannelDesc;
use gsm_saps::{L3Frame, LapdmPrim, Primitive, RlcMacFrame};

use super::channel::{LogicalChannel, PacketChannel};


/// In-process dedicated channel. Layer 3 holds the `QueueChannel`, the data link side
/// (a LAPDm implementation, or a test) holds the matching `ChannelPeer`.
pub struct QueueChannel {
    desc: ChannelDesc,
    t200: Duration,
    uplink_rx: Receiver<LapdmPrim>,
    /// Keeps the uplink queue open after the peer is dropped, so a detached data link reads as silence
    _uplink_tx: Sender<LapdmPrim>,
    downlink_tx: Sender<LapdmPrim>,
}

/// Data link end of a `QueueChannel`
#[derive(Clone)]
pub struct ChannelPeer {
    desc: ChannelDesc,
    uplink_tx: Sender<LapdmPrim>,
    downlink_rx: Receiver<LapdmPrim>,
}

pub fn queue_channel(desc: ChannelDesc, t200: Duration) -> (QueueChannel, ChannelPeer) {
    let (uplink_tx, uplink_rx) = unbounded::<LapdmPrim>();
    let (downlink_tx, downlink_rx) = unbounded::<LapdmPrim>();
    let chan = QueueChannel {
        desc,
        t200,
        uplink_rx,
        _uplink_tx: uplink_tx.clone(),
        downlink_tx,
    };
    let peer = ChannelPeer { desc, uplink_tx, downlink_rx };
    (chan, peer)
}

impl LogicalChannel for QueueChannel {
    fn desc(&self) -> ChannelDesc {
        self.desc
    }

    fn t200(&self) -> Duration {
        self.t200
    }

    fn recv_prim(&self, timeout: Option<Duration>) -> Option<LapdmPrim> {
        match timeout {
            Some(t) => self.uplink_rx.recv_timeout(t).ok(),
            None => self.uplink_rx.recv().ok(),
        }
    }

    fn send_prim(&self, prim: LapdmPrim) {
        if self.downlink_tx.send(prim).is_err() {
            tracing::warn!(chan=%self.desc, "data link detached, dropping downlink primitive");
        }
    }
}

impl ChannelPeer {
    pub fn desc(&self) -> ChannelDesc {
        self.desc
    }

    pub fn send_prim(&self, prim: LapdmPrim) {
        // Layer 3 keeps its own sender, so the queue never disconnects
        let _ = self.uplink_tx.send(prim);
    }

    pub fn send_establish(&self) {
        self.send_prim(LapdmPrim::new(Primitive::Establish));
    }

    pub fn send_l3(&self, frame: L3Frame) {
        self.send_prim(LapdmPrim::data(frame));
    }

    /// Next downlink primitive, None on timeout
    pub fn recv_prim(&self, timeout: Duration) -> Option<LapdmPrim> {
        match self.downlink_rx.recv_timeout(timeout) {
            Ok(prim) => Some(prim),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn try_recv_prim(&self) -> Option<LapdmPrim> {
        self.downlink_rx.try_recv().ok()
    }
}

/// In-process packet data channel; the MAC scheduler side holds the `PacketChannelPeer`.
pub struct QueuePacketChannel {
    desc: ChannelDesc,
    poll: Duration,
    uplink_rx: Receiver<RlcMacFrame>,
    _uplink_tx: Sender<RlcMacFrame>,
    downlink_tx: Sender<RlcMacFrame>,
}

#[derive(Clone)]
pub struct PacketChannelPeer {
    desc: ChannelDesc,
    uplink_tx: Sender<RlcMacFrame>,
    downlink_rx: Receiver<RlcMacFrame>,
}

pub fn queue_packet_channel(desc: ChannelDesc, poll: Duration) -> (QueuePacketChannel, PacketChannelPeer) {
    let (uplink_tx, uplink_rx) = unbounded::<RlcMacFrame>();
    let (downlink_tx, downlink_rx) = unbounded::<RlcMacFrame>();
    let chan = QueuePacketChannel {
        desc,
        poll,
        uplink_rx,
        _uplink_tx: uplink_tx.clone(),
        downlink_tx,
    };
    let peer = PacketChannelPeer { desc, uplink_tx, downlink_rx };
    (chan, peer)
}

impl PacketChannel for QueuePacketChannel {
    fn desc(&self) -> ChannelDesc {
        self.desc
    }

    fn recv_rlcmac(&self) -> Option<RlcMacFrame> {
        self.uplink_rx.recv_timeout(self.poll).ok()
    }

    fn send_rlcmac(&self, frame: RlcMacFrame) {
        if self.downlink_tx.send(frame).is_err() {
            tracing::warn!(chan=%self.desc, "MAC scheduler detached, dropping downlink block");
        }
    }
}

impl PacketChannelPeer {
    pub fn desc(&self) -> ChannelDesc {
        self.desc
    }

    pub fn send_rlcmac(&self, frame: RlcMacFrame) {
        let _ = self.uplink_tx.send(frame);
    }

    pub fn recv_rlcmac(&self, timeout: Duration) -> Option<RlcMacFrame> {
        self.downlink_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv_rlcmac(&self) -> Option<RlcMacFrame> {
        self.downlink_rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use gsm_core::ChannelType;

    use super::*;

    #[test]
    fn test_detached_peer_reads_as_timeout() {
        let desc = ChannelDesc::new(ChannelType::Sdcch, 0, 0);
        let (chan, peer) = queue_channel(desc, Duration::from_millis(1));
        peer.send_establish();
        drop(peer);

        assert_eq!(chan.recv_prim(Some(Duration::from_millis(5))).map(|p| p.primitive), Some(Primitive::Establish));
        assert!(chan.recv_prim(Some(Duration::from_millis(5))).is_none());
        // Downlink to a dropped peer is logged, not fatal
        chan.send_prim(LapdmPrim::new(Primitive::Release));
    }

    #[test]
    fn test_wait_for_primitive_discards_others() {
        let desc = ChannelDesc::new(ChannelType::Sdcch, 0, 1);
        let (chan, peer) = queue_channel(desc, Duration::from_millis(1));
        peer.send_l3(L3Frame::new(vec![0x05, 0x31, 0x00]));
        peer.send_prim(LapdmPrim::new(Primitive::Release));
        peer.send_establish();
        peer.send_l3(L3Frame::new(vec![0x06, 0x29, 0x00]));

        assert!(chan.wait_for_primitive(Primitive::Establish, Some(Duration::from_millis(100))).is_ok());
        // The frame after the establish is still queued
        assert!(chan.recv_l3().is_ok());
        assert!(matches!(
            chan.wait_for_primitive(Primitive::Establish, Some(Duration::from_millis(5))),
            Err(crate::ControlErr::ReadTimeout { .. })
        ));
    }

    #[test]
    fn test_recv_l3_failures() {
        let desc = ChannelDesc::new(ChannelType::Sdcch, 0, 2);
        let (chan, peer) = queue_channel(desc, Duration::from_millis(1));

        peer.send_prim(LapdmPrim::new(Primitive::Release));
        assert!(matches!(
            chan.recv_l3(),
            Err(crate::ControlErr::UnexpectedPrimitive { primitive: Primitive::Release, .. })
        ));

        peer.send_l3(L3Frame::new(vec![0x05]));
        assert!(matches!(chan.recv_l3(), Err(crate::ControlErr::UnsupportedMessage { .. })));

        // SDCCH N200 is 23, so with a 1 ms T200 the pull gives up after 23 ms
        assert_eq!(chan.read_timeout(), Duration::from_millis(23));
        assert!(matches!(chan.recv_l3(), Err(crate::ControlErr::ReadTimeout { .. })));
    }
}
