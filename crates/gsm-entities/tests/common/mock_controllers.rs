use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use gsm_core::ChannelDesc;
use gsm_entities::{ControlErr, LogicalChannel, SdcchChannel, TchChannel, TransactionControllers};
use gsm_entities::{TransactionEntry, TransactionKind, TransactionTable};
use gsm_pdus::l3::fields::mobile_identity::MobileIdentity;
use gsm_pdus::l3::pdus::assignment_complete::AssignmentComplete;
use gsm_pdus::l3::pdus::cm_service_request::CmServiceRequest;
use gsm_pdus::l3::pdus::imsi_detach_indication::ImsiDetachIndication;
use gsm_pdus::l3::pdus::location_updating_request::LocationUpdatingRequest;
use gsm_pdus::l3::pdus::paging_response::PagingResponse;

/// What the next controller invocation does after opening its transaction
#[derive(Debug, Clone)]
pub enum Script {
    /// Complete the procedure and clear the transaction
    Succeed,
    /// Fail with this error, without naming the transaction
    Fail(ControlErr),
    /// Fail with this error tagged with the transaction id
    FailTagged(ControlErr),
    /// Pull one more message from the channel, failing with whatever the read fails with
    ReadNext,
}

/// One recorded controller invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub kind: TransactionKind,
    pub chan: ChannelDesc,
}

/// Transaction controllers for testing purposes.
/// Every invocation is recorded and opens a transaction in the shared table, then
/// follows the next queued `Script` (Succeed when the queue is empty).
pub struct MockControllers {
    transactions: Arc<TransactionTable>,
    calls: Mutex<Vec<Call>>,
    script: Mutex<VecDeque<Script>>,
}

impl MockControllers {
    pub fn new(transactions: Arc<TransactionTable>) -> Self {
        Self {
            transactions,
            calls: Mutex::new(vec![]),
            script: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_script(&self, s: Script) {
        self.script.lock().unwrap().push_back(s);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn run(&self, kind: TransactionKind, subscriber: MobileIdentity, chan: &dyn LogicalChannel) -> Result<(), ControlErr> {
        let desc = chan.desc();
        tracing::debug!(chan=%desc, "mock controller {} for {}", kind, subscriber);
        self.calls.lock().unwrap().push(Call { kind, chan: desc });

        let id = self.transactions.new_id();
        self.transactions.insert(TransactionEntry::new(id, subscriber, kind, desc));

        let script = self.script.lock().unwrap().pop_front().unwrap_or(Script::Succeed);
        match script {
            Script::Succeed => {
                self.transactions.clear(id);
                Ok(())
            }
            Script::Fail(e) => Err(e),
            Script::FailTagged(e) => Err(e.with_transaction(id)),
            Script::ReadNext => match chan.recv_l3() {
                Ok(_) => {
                    self.transactions.clear(id);
                    Ok(())
                }
                Err(e) => Err(e.with_transaction(id)),
            },
        }
    }
}

impl TransactionControllers for MockControllers {
    fn location_updating(&self, req: LocationUpdatingRequest, chan: SdcchChannel<'_>) -> Result<(), ControlErr> {
        self.run(TransactionKind::LocationUpdating, req.mobile_identity, &*chan)
    }

    fn imsi_detach(&self, req: ImsiDetachIndication, chan: SdcchChannel<'_>) -> Result<(), ControlErr> {
        self.run(TransactionKind::ImsiDetach, req.mobile_identity, &*chan)
    }

    fn cm_service(&self, req: CmServiceRequest, chan: &dyn LogicalChannel) -> Result<(), ControlErr> {
        self.run(TransactionKind::MobileOriginated, req.mobile_identity, chan)
    }

    fn paging_response(&self, req: PagingResponse, chan: &dyn LogicalChannel) -> Result<(), ControlErr> {
        self.run(TransactionKind::MobileTerminated, req.mobile_identity, chan)
    }

    fn assignment_complete(&self, _req: AssignmentComplete, chan: TchChannel<'_>) -> Result<(), ControlErr> {
        self.run(TransactionKind::Assignment, MobileIdentity::NoIdentity, &*chan)
    }
}
