//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::{DEFAULT_MODEL, RetryPolicy};

/// Default number of attempts per request.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay between retries, in milliseconds.
const DEFAULT_RETRY_DELAY_MS: u32 = 1000;

/// Command-line arguments for the confab binary.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for completions.
    #[arrrg(optional, "Model to use (default: gpt-4.1)", "MODEL")]
    pub model: Option<String>,

    /// Attempts per request before giving up.
    #[arrrg(optional, "Attempts per request before giving up (default: 3)", "N")]
    pub max_attempts: Option<u32>,

    /// Delay between retries in milliseconds.
    #[arrrg(optional, "Delay between retries in milliseconds (default: 1000)", "MS")]
    pub retry_delay_ms: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for completions.
    pub model: String,

    /// Attempts per request before giving up.
    pub max_attempts: u32,

    /// Delay between consecutive attempts.
    pub retry_delay: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gpt-4.1
    /// - Max attempts: 3
    /// - Retry delay: 1000 ms
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS as u64),
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the attempts per request.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the delay between retries.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Returns the retry policy derived from this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.retry_delay)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            model: args.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_attempts: args.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            retry_delay: Duration::from_millis(
                args.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS) as u64,
            ),
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_millis(1000));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.max_attempts, 3);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("gpt-4o-mini".to_string()),
            max_attempts: Some(5),
            retry_delay_ms: Some(250),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.retry_delay, Duration::from_millis(250));
        assert!(!config.use_color);
    }

    #[test]
    fn retry_policy_from_config() {
        let config = ChatConfig::new()
            .with_max_attempts(7)
            .with_retry_delay(Duration::from_millis(10));
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 7);
        assert_eq!(policy.retry_delay, Duration::from_millis(10));
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model("gpt-4o")
            .with_max_attempts(2)
            .with_retry_delay(Duration::from_millis(50))
            .without_color();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.retry_delay, Duration::from_millis(50));
        assert!(!config.use_color);
    }
}
