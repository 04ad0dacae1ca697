//! External service integrations

pub mod calendar;
pub mod presence;
pub mod translation;
