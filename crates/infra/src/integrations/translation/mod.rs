//! Translation integration module

pub mod google;

pub use google::{GoogleTranslateClient, PassthroughTranslator};
