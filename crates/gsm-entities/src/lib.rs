//! Control plane entities: per-channel dispatch loops, protocol demultiplexing,
//! failure recovery and the shared transaction table.

pub mod control;

pub use control::bringup::ControlPlane;
pub use control::channel::{LogicalChannel, PacketChannel, SdcchChannel, TchChannel};
pub use control::controllers::TransactionControllers;
pub use control::errors::ControlErr;
pub use control::transaction_table::{TransactionEntry, TransactionKind, TransactionTable};
