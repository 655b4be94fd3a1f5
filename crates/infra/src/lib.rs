//! # MspDash Infrastructure
//!
//! Infrastructure implementations of the core billing ports.
//!
//! This crate contains:
//! - The SQLCipher database manager and embedded schema
//! - `SqlCipherBillingRepository`, the store-backed `BillingRepository`
//! - Configuration loading (environment, then JSON/TOML files)
//! - Conversions from storage errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `mspdash-core`
//! - Contains all I/O; the engine itself stays pure

pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
