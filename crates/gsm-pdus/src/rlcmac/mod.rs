pub mod enums;
pub mod pdus;

pub use pdus::rlcmac_block::RlcMacBlock;
