#![allow(dead_code)]

pub mod harness;
pub mod mock_controllers;

#[allow(unused_imports)]
pub use harness::*;
#[allow(unused_imports)]
pub use mock_controllers::*;
