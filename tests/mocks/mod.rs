//! Mock infrastructure for testing external services
//!
//! This module provides mock servers and test helpers for external dependencies:
//! - OpenAI API (chat completions, image generation, model list)
//! - Telegram Bot API (sendMessage, hostname and direct-IP paths)
//!
//! All mocks are designed to be reusable across different test files and support
//! various response scenarios (success, errors, edge cases).


pub use openai::*;
pub use telegram::*;
