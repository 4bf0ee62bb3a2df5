use gsm_pdus::l3::pdus::assignment_complete::AssignmentComplete;
use gsm_pdus::l3::pdus::cm_service_request::CmServiceRequest;
use gsm_pdus::l3::pdus::imsi_detach_indication::ImsiDetachIndication;
use gsm_pdus::l3::pdus::location_updating_request::LocationUpdatingRequest;
use gsm_pdus::l3::pdus::paging_response::PagingResponse;

use super::channel::{LogicalChannel, SdcchChannel, TchChannel};
use super::errors::ControlErr;


/// Procedure implementations invoked by the demultiplexer, one per initial message.
/// Each runs to completion on the calling channel thread and may do further I/O on the
/// channel it is given. Transactions a controller creates should be recorded in the
/// shared `TransactionTable` and tagged on any failure it returns, so recovery can clear them.
pub trait TransactionControllers: Send + Sync {
    fn location_updating(&self, req: LocationUpdatingRequest, chan: SdcchChannel<'_>) -> Result<(), ControlErr>;

    fn imsi_detach(&self, req: ImsiDetachIndication, chan: SdcchChannel<'_>) -> Result<(), ControlErr>;

    /// Mobile originated CM service (call setup, SMS, SS). Runs on SDCCH or FACCH.
    fn cm_service(&self, req: CmServiceRequest, chan: &dyn LogicalChannel) -> Result<(), ControlErr>;

    /// Mobile terminated procedures answering a page
    fn paging_response(&self, req: PagingResponse, chan: &dyn LogicalChannel) -> Result<(), ControlErr>;

    fn assignment_complete(&self, req: AssignmentComplete, chan: TchChannel<'_>) -> Result<(), ControlErr>;
}
