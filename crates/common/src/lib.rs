//! Shared infrastructure for the MspDash crates.
//!
//! # Feature Tiers
//!
//! - `foundation`: error classification shared by every layer
//! - `platform`: SQLCipher storage (encrypted r2d2 pool, pragmas, metrics)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

#[cfg(feature = "foundation")]
pub mod error;

#[cfg(feature = "platform")]
pub mod storage;

#[cfg(feature = "foundation")]
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
