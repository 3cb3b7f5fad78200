//! Go must-wrapper generator - Common Types and Utilities
//!
//! This crate contains the shared error type and source-location tracking
//! used across all components of the generator.

pub mod error;
pub mod source_loc;

pub use error::GenError;
pub use source_loc::{SourceLocation, SourceSpan};
