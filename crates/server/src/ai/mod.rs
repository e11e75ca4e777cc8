//! Product copywriting via an OpenAI-compatible chat completions API.
//!
//! The endpoint is configurable, so any provider speaking the chat
//! completions wire format works. Absent configuration disables the AI
//! routes rather than failing startup.

pub mod client;
pub mod error;
pub mod types;

pub use client::CopywriterClient;
pub use error::CopywriterError;
