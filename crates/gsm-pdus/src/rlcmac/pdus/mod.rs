pub mod control_block;
pub mod data_block;
pub mod rlcmac_block;
pub mod uplink_control_block;
