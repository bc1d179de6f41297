//! Pipeline module - loading the extracts and computing filtered aggregates

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod ranking;
pub mod records;

pub use aggregate::*;
pub use error::LoadError;
pub use filter::*;
pub use loader::*;
pub use ranking::*;
pub use records::*;
