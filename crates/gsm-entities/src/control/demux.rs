use gsm_pdus::l3::{L3Message, MmMessage, RrMessage};

use super::channel::{LogicalChannel, SdcchChannel, TchChannel};
use super::controllers::TransactionControllers;
use super::errors::ControlErr;


/// Route a decoded message to its controller by protocol discriminator
pub fn dispatch_l3(msg: L3Message, chan: &dyn LogicalChannel, controllers: &dyn TransactionControllers) -> Result<(), ControlErr> {
    match msg {
        L3Message::Mm(mm) => dispatch_mm(mm, chan, controllers),
        L3Message::Rr(rr) => dispatch_rr(rr, chan, controllers),
        other => {
            tracing::warn!(chan=%chan.desc(), "no dispatcher for {}", other);
            Err(ControlErr::unsupported())
        }
    }
}

pub fn dispatch_mm(msg: MmMessage, chan: &dyn LogicalChannel, controllers: &dyn TransactionControllers) -> Result<(), ControlErr> {
    tracing::trace!(chan=%chan.desc(), "dispatch_mm {}", msg);
    match msg {
        MmMessage::LocationUpdatingRequest(req) => {
            let Some(sdcch) = SdcchChannel::narrow(chan) else {
                panic!("LocationUpdatingRequest delivered on {}, not a dedicated signaling channel", chan.desc());
            };
            controllers.location_updating(req, sdcch)
        }
        MmMessage::ImsiDetachIndication(req) => {
            let Some(sdcch) = SdcchChannel::narrow(chan) else {
                panic!("ImsiDetachIndication delivered on {}, not a dedicated signaling channel", chan.desc());
            };
            controllers.imsi_detach(req, sdcch)
        }
        MmMessage::CmServiceRequest(req) => controllers.cm_service(req, chan),
        other @ MmMessage::Other { .. } => {
            tracing::warn!(chan=%chan.desc(), "unhandled {}", other);
            Err(ControlErr::unsupported())
        }
    }
}

pub fn dispatch_rr(msg: RrMessage, chan: &dyn LogicalChannel, controllers: &dyn TransactionControllers) -> Result<(), ControlErr> {
    tracing::trace!(chan=%chan.desc(), "dispatch_rr {}", msg);
    match msg {
        RrMessage::PagingResponse(req) => controllers.paging_response(req, chan),
        RrMessage::AssignmentComplete(req) => {
            let Some(tch) = TchChannel::narrow(chan) else {
                panic!("AssignmentComplete delivered on {}, not a traffic channel", chan.desc());
            };
            controllers.assignment_complete(req, tch)
        }
        RrMessage::GprsSuspensionRequest(req) => {
            // No GPRS suspension/resume support, the MS keeps its dedicated channel
            tracing::info!(chan=%chan.desc(), "ignoring {}", req);
            Ok(())
        }
        other @ RrMessage::Other { .. } => {
            tracing::warn!(chan=%chan.desc(), "unhandled {}", other);
            Err(ControlErr::unsupported())
        }
    }
}
