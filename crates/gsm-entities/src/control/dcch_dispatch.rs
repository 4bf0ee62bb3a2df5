use std::sync::Arc;
use std::time::{Duration, Instant};

use gsm_pdus::l3::L3Message;
use gsm_pdus::l3::enums::release_cause::ReleaseCause;
use gsm_pdus::l3::pdus::channel_release::ChannelRelease;
use gsm_saps::Primitive;

use super::channel::LogicalChannel;
use super::controllers::TransactionControllers;
use super::demux;
use super::errors::ControlErr;
use super::transaction_table::TransactionTable;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcchState {
    /// Idle, waiting for the MS to establish the data link
    WaitEstablish,
    /// A message is being handled by the demultiplexer and its controller
    Dispatching,
}

/// How one establish-to-idle cycle of the loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DcchStep {
    /// The procedure ran to completion
    Completed,
    /// A failure was recovered by releasing the channel with this cause
    Released(ReleaseCause),
    /// A captured frame could not be decoded again and was dropped without a release
    Dropped,
}

/// What recovery decided to do with a failure
enum Recovery {
    Redispatch(L3Message),
    Released(ReleaseCause),
    Dropped,
}

/// Control loop of one dedicated channel (SDCCH or FACCH).
/// Waits for an establish, pulls the first message, dispatches it, and recovers from
/// whatever failure the procedure raises. Never terminates on its own.
pub struct DcchDispatcher {
    chan: Box<dyn LogicalChannel>,
    controllers: Arc<dyn TransactionControllers>,
    transactions: Arc<TransactionTable>,
    establish_timeout: Option<Duration>,
    state: DcchState,
    /// Start of the current cycle; bounds the channel lookup during recovery
    cycle_start: Instant,
}

impl DcchDispatcher {
    pub fn new(
        chan: Box<dyn LogicalChannel>,
        controllers: Arc<dyn TransactionControllers>,
        transactions: Arc<TransactionTable>,
        establish_timeout: Option<Duration>,
    ) -> Self {
        Self {
            chan,
            controllers,
            transactions,
            establish_timeout,
            state: DcchState::WaitEstablish,
            cycle_start: Instant::now(),
        }
    }

    pub fn state(&self) -> DcchState {
        self.state
    }

    pub fn channel(&self) -> &dyn LogicalChannel {
        self.chan.as_ref()
    }

    /// Run cycles forever
    pub fn run(&mut self) -> ! {
        tracing::info!(chan=%self.chan.desc(), "starting DCCH dispatcher");
        loop {
            let step = self.step();
            tracing::trace!(chan=%self.chan.desc(), "cycle ended: {:?}", step);
        }
    }

    /// One full cycle: establish, first message, dispatch (and re-dispatch), back to idle
    pub fn step(&mut self) -> DcchStep {
        self.state = DcchState::WaitEstablish;
        self.cycle_start = Instant::now();

        let first = self
            .chan
            .wait_for_primitive(Primitive::Establish, self.establish_timeout)
            .and_then(|_| {
                tracing::debug!(chan=%self.chan.desc(), "established");
                self.chan.recv_l3()
            });

        let mut outcome = match first {
            Ok(msg) => self.dispatch(msg),
            Err(e) => Err(e),
        };

        let step = loop {
            let err = match outcome {
                Ok(()) => break DcchStep::Completed,
                Err(e) => e,
            };
            match self.recover(err) {
                Recovery::Redispatch(msg) => outcome = self.dispatch(msg),
                Recovery::Released(cause) => break DcchStep::Released(cause),
                Recovery::Dropped => break DcchStep::Dropped,
            }
        };

        self.state = DcchState::WaitEstablish;
        step
    }

    fn dispatch(&mut self, msg: L3Message) -> Result<(), ControlErr> {
        self.state = DcchState::Dispatching;
        let chan = self.chan.as_ref();
        let result = demux::dispatch_l3(msg, chan, self.controllers.as_ref());
        if result.is_ok() {
            tracing::debug!(chan=%chan.desc(), "procedure complete");
        }
        result
    }

    /// Clear the failing transaction, then release the channel or re-dispatch the captured frame
    fn recover(&mut self, err: ControlErr) -> Recovery {
        let desc = self.chan.desc();
        tracing::warn!(chan=%desc, "recovering from {}", err);

        // Only transactions of this session; older ones on the channel may have moved on to a TCH
        let tid = err
            .transaction_id()
            .or_else(|| self.transactions.find_by_channel_since(&desc, self.cycle_start));
        match tid {
            Some(id) => {
                self.transactions.clear(id);
            }
            None if err.is_session_failure() => {
                tracing::warn!(chan=%desc, "{} with no known transaction, a stray transaction may remain", err);
            }
            None => {}
        }

        if let ControlErr::UnexpectedMessage { frame: Some(frame), .. } = &err {
            return match L3Message::from_frame(frame) {
                Ok(msg) => {
                    tracing::debug!(chan=%desc, "re-dispatching {}", msg);
                    Recovery::Redispatch(msg)
                }
                Err(e) => {
                    tracing::warn!(chan=%desc, "dropping unparseable frame {:?}: {}", frame, e);
                    Recovery::Dropped
                }
            };
        }

        let cause = err.release_cause().unwrap_or(ReleaseCause::AbnormalUnspecified);
        let release = ChannelRelease::new(cause);
        tracing::info!(chan=%desc, "-> {}", release);
        self.chan.send_l3(release.to_frame());
        Recovery::Released(cause)
    }
}
