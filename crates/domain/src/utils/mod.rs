//! Pure helpers shared by the core services.

pub mod date_grammar;

pub use date_grammar::{parse_time_expression, ParseStatus, ParsedExpression};
