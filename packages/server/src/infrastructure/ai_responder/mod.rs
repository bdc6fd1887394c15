//! AI Responder Adapter
//!
//! Sends one question to the external prediction endpoint and reduces the
//! reply to a single answer string.

pub mod http;
pub mod normalize;

pub use http::HttpAiResponder;
pub use normalize::{FALLBACK_ANSWER, normalize_answer};
