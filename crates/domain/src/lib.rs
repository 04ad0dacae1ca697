//! # AwayDesk Domain
//!
//! Business domain types and models for AwayDesk.
//!
//! This crate contains:
//! - Domain data types (ResolvedWindow, Event, DecisionOutcome, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - The natural-language date grammar
//!
//! ## Architecture
//! - No dependencies on other AwayDesk crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::date_grammar::{parse_time_expression, ParseStatus, ParsedExpression};
