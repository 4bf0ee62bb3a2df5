//! GSM layer 3 (04.08) and GPRS RLC/MAC (04.60) PDU codec

pub mod l3;
pub mod rlcmac;
