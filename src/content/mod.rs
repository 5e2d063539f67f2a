//! Content generation module
//!
//! Blog post and header image generation for the admin publishing flow.

pub mod generator;

pub use generator::{BlogContent, ContentGenerator};
