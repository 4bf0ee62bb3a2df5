use std::sync::Arc;
use std::time::Duration;

use gsm_config::{CfgGprs, StackConfig};
use gsm_core::{BitBuffer, ChannelDesc, ChannelType};
use gsm_entities::control::dcch_dispatch::DcchDispatcher;
use gsm_entities::control::pdch_dispatch::PdchDispatcher;
use gsm_entities::control::queue_channel::{ChannelPeer, PacketChannelPeer, queue_channel, queue_packet_channel};
use gsm_entities::{TransactionControllers, TransactionTable};
use gsm_pdus::l3::pdus::channel_release::ChannelRelease;
use gsm_saps::{L3Frame, Primitive};

use super::mock_controllers::MockControllers;

/// T200 used in tests. SDCCH reads give up after N200 (23) of these.
pub const TEST_T200: Duration = Duration::from_millis(2);

/// LOCATION UPDATING REQUEST, IMSI attach, TMSI 0x01020304
pub const LU_REQUEST: &str = "05 08 72 00 F1 10 03 E8 33 05 F4 01 02 03 04";
/// IMSI DETACH INDICATION, IMSI 001010123456789
pub const IMSI_DETACH: &str = "05 01 33 08 09 10 10 10 32 54 76 98";
/// CM SERVICE REQUEST for SMS, TMSI 0xCAFE0001
pub const CM_SERVICE_REQUEST: &str = "05 24 04 03 33 19 A2 05 F4 CA FE 00 01";
/// PAGING RESPONSE, TMSI 42
pub const PAGING_RESPONSE: &str = "06 27 07 03 33 19 A2 05 F4 00 00 00 2A";
pub const ASSIGNMENT_COMPLETE: &str = "06 29 00";
/// GPRS SUSPENSION REQUEST, TLLI 0xC0000001
pub const GPRS_SUSPENSION_REQUEST: &str = "06 34 C0 00 00 01 00 F1 10 03 E8 05 02";
/// MM STATUS, no controller for it
pub const MM_STATUS: &str = "05 31 62";

pub fn frame(hex: &str) -> L3Frame {
    L3Frame::from(BitBuffer::from_hexstr(hex).unwrap())
}

/// Creates a default config for testing. It can still be modified as needed
/// before passing it to the control plane
pub fn default_test_config() -> StackConfig {
    let mut cfg = StackConfig::default();
    cfg.channels.sdcch_count = 2;
    cfg.channels.tch_count = 1;
    cfg.channels.gprs = Some(CfgGprs { timeslot: 2, pdch_count: 1 });
    cfg.timers.t200_ms = TEST_T200.as_millis() as u64;
    cfg.timers.pdch_poll_ms = 5;
    cfg
}

/// One dedicated channel with its dispatcher, driven step by step from the test thread
pub struct DcchTest {
    pub dispatcher: DcchDispatcher,
    pub peer: ChannelPeer,
    pub controllers: Arc<MockControllers>,
    pub transactions: Arc<TransactionTable>,
}

impl DcchTest {
    pub fn new(chan_type: ChannelType) -> Self {
        let desc = match chan_type {
            ChannelType::TchFacch => ChannelDesc::new(chan_type, 1, 0),
            _ => ChannelDesc::new(chan_type, 0, 0),
        };
        let (chan, peer) = queue_channel(desc, TEST_T200);
        let transactions = Arc::new(TransactionTable::new());
        let controllers = Arc::new(MockControllers::new(transactions.clone()));
        let dyn_controllers: Arc<dyn TransactionControllers> = controllers.clone();
        let dispatcher = DcchDispatcher::new(Box::new(chan), dyn_controllers, transactions.clone(), None);
        Self { dispatcher, peer, controllers, transactions }
    }

    /// Queue an establish followed by the given message
    pub fn submit(&self, hex: &str) {
        self.peer.send_establish();
        self.peer.send_l3(frame(hex));
    }

    /// All downlink CHANNEL RELEASE causes sent so far
    pub fn take_releases(&self) -> Vec<u8> {
        let mut causes = vec![];
        while let Some(prim) = self.peer.try_recv_prim() {
            assert_eq!(prim.primitive, Primitive::Data);
            let sdu = prim.sdu.expect("downlink DATA without payload");
            let release = ChannelRelease::from_bitbuf(&mut sdu.bitbuf()).expect("downlink is not a CHANNEL RELEASE");
            causes.push(release.rr_cause.into_raw() as u8);
        }
        causes
    }
}

/// One packet channel with its dispatcher, driven poll by poll
pub struct PdchTest {
    pub dispatcher: PdchDispatcher,
    pub peer: PacketChannelPeer,
}

impl PdchTest {
    pub fn new() -> Self {
        let desc = ChannelDesc::new(ChannelType::Pdtch, 2, 0);
        let (chan, peer) = queue_packet_channel(desc, Duration::from_millis(5));
        Self { dispatcher: PdchDispatcher::new(Box::new(chan)), peer }
    }
}
