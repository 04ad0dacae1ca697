//! Availability decisions: resolve, aggregate, decide, format

pub mod aggregator;
pub mod engine;
pub mod formatter;
pub mod ports;
pub mod resolver;

pub use aggregator::EventAggregator;
pub use engine::{CooldownState, DecisionEngine};
pub use formatter::ResponseFormatter;
pub use ports::*;
pub use resolver::{ResolveFailure, TimeExpressionResolver};
