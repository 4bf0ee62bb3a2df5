pub mod bringup;
pub mod channel;
pub mod controllers;
pub mod dcch_dispatch;
pub mod demux;
pub mod errors;
pub mod pdch_dispatch;
pub mod queue_channel;
pub mod transaction_table;
