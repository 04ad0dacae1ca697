//! Chat transports feeding the assistant

pub mod console;
