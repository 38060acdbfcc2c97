//! Core chat session state.
//!
//! This module provides the `ChatSession` struct which owns the transcript
//! and the running statistics. The session is a plain value threaded through
//! the loop; nothing else mutates it.

use std::fmt;
use std::time::Duration;

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The person at the keyboard.
    User,
    /// The model.
    Bot,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "User"),
            Speaker::Bot => write!(f, "Bot"),
        }
    }
}

/// One recorded line of conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Who said it.
    pub speaker: Speaker,
    /// What was said.
    pub text: String,
}

/// Aggregated statistics for a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// The number of completed exchanges.
    pub exchange_count: u64,
    /// Total response latency accumulated across completed exchanges.
    pub total_latency: Duration,
    /// Average latency per completed exchange; `None` before the first.
    pub average_latency: Option<Duration>,
}

/// A chat session that owns the transcript and running statistics.
///
/// Turns are appended in User/Bot pairs and never mutated or removed, so
/// the transcript length is always even after a successful exchange and
/// the exchange counter equals the number of Bot turns.
#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Vec<Turn>,
    exchange_count: u64,
    total_latency: Duration,
}

impl ChatSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed exchange.
    ///
    /// Appends the User/Bot turn pair, increments the exchange counter,
    /// and adds `elapsed` to the latency accumulator. Only completed
    /// exchanges move the statistics; API errors and malformed responses
    /// leave the session untouched.
    pub fn record_exchange(&mut self, user_text: &str, reply: &str, elapsed: Duration) {
        self.transcript.push(Turn {
            speaker: Speaker::User,
            text: user_text.to_string(),
        });
        self.transcript.push(Turn {
            speaker: Speaker::Bot,
            text: reply.to_string(),
        });
        self.exchange_count += 1;
        self.total_latency += elapsed;
    }

    /// Returns the transcript in insertion order.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Returns the number of completed exchanges.
    pub fn exchange_count(&self) -> u64 {
        self.exchange_count
    }

    /// Returns the current statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        let average_latency = if self.exchange_count > 0 {
            Some(self.total_latency.div_f64(self.exchange_count as f64))
        } else {
            None
        };
        SessionStats {
            exchange_count: self.exchange_count,
            total_latency: self.total_latency,
            average_latency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_empty() {
        let session = ChatSession::new();
        assert_eq!(session.exchange_count(), 0);
        assert!(session.transcript().is_empty());
        assert!(session.stats().average_latency.is_none());
    }

    #[test]
    fn record_exchange_appends_pair() {
        let mut session = ChatSession::new();
        session.record_exchange("hello", "hi", Duration::from_millis(100));

        assert_eq!(session.exchange_count(), 1);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(
            session.transcript()[0],
            Turn {
                speaker: Speaker::User,
                text: "hello".to_string(),
            }
        );
        assert_eq!(
            session.transcript()[1],
            Turn {
                speaker: Speaker::Bot,
                text: "hi".to_string(),
            }
        );
    }

    #[test]
    fn transcript_invariants_hold() {
        let mut session = ChatSession::new();
        for i in 0..5 {
            session.record_exchange(&format!("q{i}"), &format!("a{i}"), Duration::from_millis(10));
            assert_eq!(session.transcript().len() % 2, 0);
            let bot_turns = session
                .transcript()
                .iter()
                .filter(|turn| turn.speaker == Speaker::Bot)
                .count() as u64;
            assert_eq!(session.exchange_count(), bot_turns);
        }
    }

    #[test]
    fn average_latency_is_total_over_count() {
        let mut session = ChatSession::new();
        let latencies = [120, 80, 310, 40];
        for (i, ms) in latencies.iter().enumerate() {
            session.record_exchange(&format!("q{i}"), "ok", Duration::from_millis(*ms));
        }

        let stats = session.stats();
        let total: u64 = latencies.iter().sum();
        assert_eq!(stats.exchange_count, latencies.len() as u64);
        assert_eq!(stats.total_latency, Duration::from_millis(total));
        assert_eq!(
            stats.average_latency,
            Some(Duration::from_millis(total).div_f64(latencies.len() as f64))
        );
    }
}
