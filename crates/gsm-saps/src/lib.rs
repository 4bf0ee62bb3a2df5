//! Service primitives exchanged between the data link layers and the control plane

pub mod lapdm;
pub mod pdtch;

pub use lapdm::{L3Frame, LapdmPrim, Primitive};
pub use pdtch::RlcMacFrame;
