pub mod l3;
pub mod rlcmac;
