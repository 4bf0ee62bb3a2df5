use gsm_core::TransactionId;
use gsm_pdus::l3::enums::release_cause::ReleaseCause;
use gsm_saps::{L3Frame, Primitive};
use thiserror::Error;


/// Failures raised by channel reads and transaction controllers.
/// All of them are caught by the channel loop and turned into a recovery action.
#[derive(Debug, Clone, Error)]
pub enum ControlErr {
    /// Nothing arrived on the channel in time
    #[error("channel read timeout")]
    ReadTimeout { transaction_id: Option<TransactionId> },

    /// A data link primitive arrived where L3 data was expected
    #[error("unexpected primitive {primitive}")]
    UnexpectedPrimitive { primitive: Primitive, transaction_id: Option<TransactionId> },

    /// A valid message that does not fit the current procedure state.
    /// The frame, when captured, is re-dispatched from the top.
    #[error("unexpected message")]
    UnexpectedMessage { frame: Option<L3Frame>, transaction_id: Option<TransactionId> },

    /// A message the control plane cannot decode or has no handler for
    #[error("unsupported message")]
    UnsupportedMessage { transaction_id: Option<TransactionId> },

    #[error("procedure timer {timer} expired")]
    ProcedureTimerExpired { timer: String, transaction_id: Option<TransactionId> },

    /// Remote session peer did not answer
    #[error("session timeout")]
    SessionTimeout { transaction_id: Option<TransactionId> },

    #[error("session protocol error: {reason}")]
    SessionProtocolError { reason: String, transaction_id: Option<TransactionId> },
}

impl ControlErr {
    pub fn read_timeout() -> Self {
        ControlErr::ReadTimeout { transaction_id: None }
    }

    pub fn unsupported() -> Self {
        ControlErr::UnsupportedMessage { transaction_id: None }
    }

    pub fn transaction_id(&self) -> Option<TransactionId> {
        match self {
            ControlErr::ReadTimeout { transaction_id }
            | ControlErr::UnexpectedPrimitive { transaction_id, .. }
            | ControlErr::UnexpectedMessage { transaction_id, .. }
            | ControlErr::UnsupportedMessage { transaction_id }
            | ControlErr::ProcedureTimerExpired { transaction_id, .. }
            | ControlErr::SessionTimeout { transaction_id }
            | ControlErr::SessionProtocolError { transaction_id, .. } => *transaction_id,
        }
    }

    /// Attach the transaction the failure belongs to, replacing any previous one
    pub fn with_transaction(mut self, id: TransactionId) -> Self {
        match &mut self {
            ControlErr::ReadTimeout { transaction_id }
            | ControlErr::UnexpectedPrimitive { transaction_id, .. }
            | ControlErr::UnexpectedMessage { transaction_id, .. }
            | ControlErr::UnsupportedMessage { transaction_id }
            | ControlErr::ProcedureTimerExpired { transaction_id, .. }
            | ControlErr::SessionTimeout { transaction_id }
            | ControlErr::SessionProtocolError { transaction_id, .. } => *transaction_id = Some(id),
        }
        self
    }

    /// RR cause for the CHANNEL RELEASE sent on this failure.
    /// None when the failure is handled by re-dispatching a captured frame.
    pub fn release_cause(&self) -> Option<ReleaseCause> {
        match self {
            ControlErr::ReadTimeout { .. } => Some(ReleaseCause::AbnormalTimerExpired),
            ControlErr::UnexpectedPrimitive { .. } => Some(ReleaseCause::MessageTypeNotCompatibleWithProtocolState),
            ControlErr::UnexpectedMessage { frame: Some(_), .. } => None,
            ControlErr::UnexpectedMessage { frame: None, .. } => Some(ReleaseCause::MessageTypeNotCompatibleWithProtocolState),
            ControlErr::UnsupportedMessage { .. } => Some(ReleaseCause::MessageTypeNotImplemented),
            ControlErr::ProcedureTimerExpired { .. } => Some(ReleaseCause::AbnormalTimerExpired),
            ControlErr::SessionTimeout { .. } => Some(ReleaseCause::AbnormalTimerExpired),
            ControlErr::SessionProtocolError { .. } => Some(ReleaseCause::AbnormalUnspecified),
        }
    }

    /// Session failures can leave a transaction behind that nobody else will clear
    pub fn is_session_failure(&self) -> bool {
        matches!(self, ControlErr::SessionTimeout { .. } | ControlErr::SessionProtocolError { .. })
    }
}
