//! Error conversions from infrastructure crates into domain errors.

mod conversions;

pub use conversions::InfraError;
