//! Core utilities for the GSM control plane
//!
//! This crate provides fundamental types and utilities used across the workspace:
//! - BitBuffer for bit-level PDU manipulation
//! - PduParseErr and the field-parsing macros
//! - Logical channel types and descriptors
//! - Logging setup

pub mod bitbuffer;
pub mod channel_type;
pub mod debug;
pub mod pdu_parse_error;

// Re-export commonly used items
pub use bitbuffer::BitBuffer;
pub use channel_type::{ChannelDesc, ChannelType};
pub use pdu_parse_error::PduParseErr;


/// Identifier of a transaction (one procedure instance) in the transaction table
pub type TransactionId = u32;

/// Temporary Flow Identity, 5 bits
pub type Tfi = u8;

/// Temporary Logical Link Identity, 32 bits
pub type Tlli = u32;
