//! Assistant chat module
//!
//! The responder behind the site's chat widget and its canned replies.

pub mod fallback;
pub mod responder;

pub use fallback::fallback_reply;
pub use responder::ChatResponder;
