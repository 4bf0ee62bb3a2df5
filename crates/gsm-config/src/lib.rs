//! GSM control plane configuration management
//!
//! This crate provides configuration loading and parsing for the control plane:
//! - TOML configuration file parsing
//! - Stack configuration structures (channel counts, LAPDm/PDCH timers, logging)

pub mod stack_config;
pub mod toml_config;

pub use stack_config::*;
pub use toml_config::*;
