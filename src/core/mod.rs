//! Core settlement types, aggregation, and statement building.
//!
//! This module provides the foundational types for the monthly settlement:
//! the price catalog, the location → business directory, the aggregator, and
//! the statement builder with its supply/tax split.

mod aggregate;
mod catalog;
mod directory;
mod error;
mod statement;
mod types;

pub use aggregate::*;
pub use catalog::*;
pub use directory::*;
pub use error::*;
pub use statement::*;
pub use types::*;
