pub mod enums;
pub mod fields;
pub mod l3_message;
pub mod pdus;

pub use l3_message::{L3Header, L3Message, MmMessage, RrMessage};
