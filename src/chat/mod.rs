//! Chat application module for interactive sessions with a completion API.
//!
//! This module provides the pieces the confab binary assembles into its
//! session loop:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`input`]: input validation ahead of any network traffic
//! - [`session`]: transcript and statistics owned by the loop
//! - [`render`]: output rendering with optional ANSI styling

mod config;
mod input;
mod render;
mod session;

pub use config::{ChatArgs, ChatConfig};
pub use input::{InputAction, MAX_MESSAGE_CHARS, classify_input};
pub use render::{PlainTextRenderer, Renderer};
pub use session::{ChatSession, SessionStats, Speaker, Turn};
