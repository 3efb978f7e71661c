//! Core contracts for nopol.
//!
//! This crate defines the region-to-registration-code table shared by the
//! identifier generators and the CLI, plus its file format and validation.

mod data;
pub mod error;
pub mod region;
pub mod validation;

pub use error::{Error, Result};
pub use region::{RegionCodeTable, RegionEntry};
pub use validation::{SharedCodes, is_region_code, validate_entries, validate_entries_with};
