//! Database implementations

pub mod billing_repository;
pub mod manager;

pub use billing_repository::*;
pub use manager::*;
