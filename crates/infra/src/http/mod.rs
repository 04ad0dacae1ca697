//! Shared HTTP plumbing for the external adapters

mod client;

pub use client::{HttpClient, HttpClientBuilder};
