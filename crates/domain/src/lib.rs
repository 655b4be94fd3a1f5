//! # MspDash Domain
//!
//! Business domain types for the MspDash billing engine.
//!
//! This crate contains:
//! - Client, billing plan, override, inventory and ticket records
//! - The rate and feature descriptor tables
//! - Receipt and dashboard value types
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other MspDash crates
//! - Pure data, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
