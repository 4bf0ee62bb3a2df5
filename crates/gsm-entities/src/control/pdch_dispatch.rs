use std::collections::HashMap;

use gsm_pdus::rlcmac::RlcMacBlock;
use gsm_pdus::rlcmac::enums::payload_type::PayloadType;
use gsm_pdus::rlcmac::pdus::control_block::RlcMacControlBlock;

use super::channel::PacketChannel;


/// Handles decoded uplink blocks of one payload type
pub trait RlcMacBlockHandler: Send {
    fn handle(&mut self, block: RlcMacBlock, chan: &dyn PacketChannel);
}

/// Acknowledges the final block (CV = 0) of an uplink TBF with a PACKET UPLINK ACK/NACK
/// carrying the same TFI and, for contention resolution, the TLLI
pub struct UplinkAckHandler;

impl RlcMacBlockHandler for UplinkAckHandler {
    fn handle(&mut self, block: RlcMacBlock, chan: &dyn PacketChannel) {
        let data = match block {
            RlcMacBlock::Data(data) => data,
            other => {
                tracing::warn!(chan=%chan.desc(), "UplinkAckHandler got non-data block {}", other);
                return;
            }
        };
        if !data.is_final() {
            tracing::trace!(chan=%chan.desc(), "tfi {} bsn {} cv {}", data.tfi, data.bsn, data.cv);
            return;
        }
        let ack = RlcMacControlBlock::new_uplink_ack(data.tfi, data.tlli);
        tracing::debug!(chan=%chan.desc(), "-> {}", ack);
        chan.send_rlcmac(ack.to_frame());
    }
}

/// Result of one receive cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdchOutcome {
    /// Nothing arrived within the poll interval
    Idle,
    Handled(PayloadType),
    /// No handler registered for this payload type
    Unhandled(PayloadType),
    /// Frame did not decode and was dropped
    DecodeFailed,
}

/// Receive loop of one packet data channel
pub struct PdchDispatcher {
    chan: Box<dyn PacketChannel>,
    handlers: HashMap<PayloadType, Box<dyn RlcMacBlockHandler>>,
}

impl PdchDispatcher {
    /// Dispatcher with the uplink acknowledgment handler installed for data blocks
    pub fn new(chan: Box<dyn PacketChannel>) -> Self {
        let mut d = Self::without_handlers(chan);
        d.register_handler(PayloadType::Data, Box::new(UplinkAckHandler));
        d
    }

    pub fn without_handlers(chan: Box<dyn PacketChannel>) -> Self {
        Self { chan, handlers: HashMap::new() }
    }

    /// Install `handler` for `payload_type`, returning the one it replaces
    pub fn register_handler(
        &mut self,
        payload_type: PayloadType,
        handler: Box<dyn RlcMacBlockHandler>,
    ) -> Option<Box<dyn RlcMacBlockHandler>> {
        self.handlers.insert(payload_type, handler)
    }

    pub fn run(&mut self) -> ! {
        tracing::info!(chan=%self.chan.desc(), "starting PDCH dispatcher");
        loop {
            self.poll_once();
        }
    }

    pub fn poll_once(&mut self) -> PdchOutcome {
        let Some(frame) = self.chan.recv_rlcmac() else {
            return PdchOutcome::Idle;
        };

        let block = match RlcMacBlock::from_frame(&frame) {
            Ok(block) => block,
            Err(e) => {
                tracing::warn!(chan=%self.chan.desc(), "Failed parsing RLC/MAC block: {} {:?}", e, frame);
                return PdchOutcome::DecodeFailed;
            }
        };
        tracing::debug!(chan=%self.chan.desc(), "<- {}", block);

        let payload_type = block.payload_type();
        match self.handlers.get_mut(&payload_type) {
            Some(handler) => {
                handler.handle(block, self.chan.as_ref());
                PdchOutcome::Handled(payload_type)
            }
            None if payload_type == PayloadType::Reserved => {
                tracing::debug!(chan=%self.chan.desc(), "ignoring block with reserved payload type");
                PdchOutcome::Unhandled(payload_type)
            }
            None => {
                tracing::warn!(chan=%self.chan.desc(), "unhandled {} block: {}", payload_type, block);
                PdchOutcome::Unhandled(payload_type)
            }
        }
    }
}
