//! OpenAI API integration module
//!
//! Provides the typed client and wire models for the OpenAI endpoints
//! this crate uses.

pub mod client;
pub mod models;

pub use client::OpenAIClient;
pub use models::*;
