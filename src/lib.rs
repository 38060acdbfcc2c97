// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod observability;
pub mod response;

// Re-exports
pub use client::{ChatRequest, DEFAULT_MODEL, OpenAi, RetryPolicy, Transport, dispatch};
pub use error::{Error, Result};
pub use response::{Outcome, TokenUsage, interpret};
