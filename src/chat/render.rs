//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows
//! for different output styles. The default implementation uses ANSI
//! escape codes for styling errors and the statistics block.

use std::io::{self, Stdout, Write};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::chat::session::{SessionStats, Turn};
use crate::response::TokenUsage;

/// ANSI escape code for dim text (used for timestamps and token counts).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the statistics block).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
pub trait Renderer: Send {
    /// Print a completed reply together with its token counts.
    fn print_reply(&mut self, reply: &str, usage: &TokenUsage);

    /// Print an API-level error message carried in a response payload.
    fn print_api_error(&mut self, message: &str);

    /// Print a notice about a response this client could not make sense of.
    fn print_notice(&mut self, notice: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print the cumulative statistics block.
    fn print_stats(&mut self, stats: &SessionStats);

    /// Print the full transcript.
    ///
    /// Every line carries the same timestamp: the moment of printing, not
    /// the moment the turn occurred.
    fn print_transcript(&mut self, transcript: &[Turn]);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout so output appears before the next prompt.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_reply(&mut self, reply: &str, usage: &TokenUsage) {
        println!("Bot: {reply}");
        if self.use_color {
            print!("{ANSI_DIM}");
        }
        println!("Response Tokens: {}", usage.completion_tokens);
        println!("Prompt Tokens: {}", usage.prompt_tokens);
        println!("Total Tokens: {}", usage.total_tokens);
        if self.use_color {
            print!("{ANSI_RESET}");
        }
        self.flush();
    }

    fn print_api_error(&mut self, message: &str) {
        if self.use_color {
            println!("{ANSI_RED}Bot Error: {message}{ANSI_RESET}");
        } else {
            println!("Bot Error: {message}");
        }
        self.flush();
    }

    fn print_notice(&mut self, notice: &str) {
        println!("Bot: {notice}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("Error: {error}");
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_stats(&mut self, stats: &SessionStats) {
        if self.use_color {
            print!("{ANSI_CYAN}");
        }
        println!("\nChat Statistics:");
        println!("- Total Conversations: {}", stats.exchange_count);
        match stats.average_latency {
            Some(average) => {
                println!("- Average Response Time: {:.3} seconds", average.as_secs_f64())
            }
            None => println!("- Average Response Time: n/a"),
        }
        if self.use_color {
            print!("{ANSI_RESET}");
        }
        self.flush();
    }

    fn print_transcript(&mut self, transcript: &[Turn]) {
        println!("\nConversation History:");
        // One timestamp for the whole reprint.
        let stamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "-".to_string());
        for turn in transcript {
            if self.use_color {
                println!(
                    "{ANSI_DIM}[{stamp}]{ANSI_RESET} {}: {}",
                    turn.speaker, turn.text
                );
            } else {
                println!("[{stamp}] {}: {}", turn.speaker, turn.text);
            }
        }
        println!();
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }
}
