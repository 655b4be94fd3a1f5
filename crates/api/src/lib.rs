//! # MspDash App
//!
//! Application layer - commands and the `mspdash` binary.
//!
//! This crate contains:
//! - Commands (timed, logged entry points over the billing service)
//! - Application context (dependency injection)
//! - Logging setup shared by the binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

pub use commands::*;
pub use context::*;
