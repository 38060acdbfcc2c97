//! Interpretation of completion API response bodies.
//!
//! A raw body from the dispatcher decodes to exactly one of three shapes:
//! an API error payload, a successful completion, or something this client
//! does not recognize (including the dispatcher's own failure sentinel,
//! which is not JSON at all).

use serde::Deserialize;

/// Token accounting reported by the API for one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TokenUsage {
    /// Tokens generated for the reply.
    pub completion_tokens: u64,
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u64,
    /// Total tokens billed for the exchange.
    pub total_tokens: u64,
}

/// The interpreted meaning of one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The API returned an error payload; carries its message field.
    ApiError(String),
    /// The API returned a completion.
    Completion {
        /// The first choice's message content.
        reply: String,
        /// Token counts from the usage field.
        usage: TokenUsage,
    },
    /// The body could not be parsed or had an unrecognized shape.
    Malformed(String),
}

#[derive(Deserialize)]
struct ResponseBody {
    error: Option<ErrorDetail>,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Interprets a raw response body.
///
/// An `error` field wins over everything else. Otherwise a non-empty
/// `choices` sequence with a first message content and a `usage` object is
/// a completion. Anything else, including unparseable text, is malformed.
pub fn interpret(body: &str) -> Outcome {
    let parsed: ResponseBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => return Outcome::Malformed(format!("JSON parsing error: {err}")),
    };

    if let Some(error) = parsed.error {
        let message = error
            .message
            .unwrap_or_else(|| "unspecified API error".to_string());
        return Outcome::ApiError(message);
    }

    let reply = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content);

    match (reply, parsed.usage) {
        (Some(reply), Some(usage)) => Outcome::Completion { reply, usage },
        _ => Outcome::Malformed("unrecognized response shape".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_payload() {
        let outcome = interpret(r#"{"error":{"message":"bad key"}}"#);
        assert_eq!(outcome, Outcome::ApiError("bad key".to_string()));
    }

    #[test]
    fn error_payload_without_message() {
        let outcome = interpret(r#"{"error":{"type":"server_error"}}"#);
        assert_eq!(
            outcome,
            Outcome::ApiError("unspecified API error".to_string())
        );
    }

    #[test]
    fn completion_payload() {
        let body = r#"{"choices":[{"message":{"content":"hi"}}],"usage":{"completion_tokens":1,"prompt_tokens":2,"total_tokens":3}}"#;
        assert_eq!(
            interpret(body),
            Outcome::Completion {
                reply: "hi".to_string(),
                usage: TokenUsage {
                    completion_tokens: 1,
                    prompt_tokens: 2,
                    total_tokens: 3,
                },
            }
        );
    }

    #[test]
    fn unparseable_body() {
        assert!(matches!(
            interpret("not json at all"),
            Outcome::Malformed(diag) if diag.contains("JSON parsing error")
        ));
    }

    #[test]
    fn sentinel_is_malformed() {
        let sentinel = "Error: failed to reach the API after 3 attempts.";
        assert!(matches!(interpret(sentinel), Outcome::Malformed(_)));
    }

    #[test]
    fn empty_choices_is_malformed() {
        assert_eq!(
            interpret(r#"{"choices":[]}"#),
            Outcome::Malformed("unrecognized response shape".to_string())
        );
    }

    #[test]
    fn completion_without_usage_is_malformed() {
        let body = r#"{"choices":[{"message":{"content":"hi"}}]}"#;
        assert_eq!(
            interpret(body),
            Outcome::Malformed("unrecognized response shape".to_string())
        );
    }

    #[test]
    fn error_wins_over_choices() {
        let body = r#"{"error":{"message":"overloaded"},"choices":[{"message":{"content":"hi"}}]}"#;
        assert_eq!(interpret(body), Outcome::ApiError("overloaded".to_string()));
    }
}
