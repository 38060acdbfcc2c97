//! Input validation for the session loop.
//!
//! Every line read at the prompt is classified before anything touches the
//! network: the exit word ends the session, blank or oversized lines are
//! rejected with a message, and everything else is sent as-is.

/// Maximum accepted message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// What the session loop should do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// End the session.
    Exit,
    /// Send the message to the API.
    Send(String),
    /// Reject the input and re-prompt; carries the message to print.
    Reject(&'static str),
}

/// Classifies one line of user input.
///
/// The literal word `exit` ends the session. Empty lines and lines longer
/// than [`MAX_MESSAGE_CHARS`] characters are rejected without counting
/// toward any statistic.
pub fn classify_input(line: &str) -> InputAction {
    if line == "exit" {
        return InputAction::Exit;
    }
    if line.is_empty() {
        return InputAction::Reject("Please enter a valid message.");
    }
    if line.chars().count() > MAX_MESSAGE_CHARS {
        return InputAction::Reject("Message too long. Please enter a shorter message.");
    }
    InputAction::Send(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_word() {
        assert_eq!(classify_input("exit"), InputAction::Exit);
    }

    #[test]
    fn exit_must_be_exact() {
        assert!(matches!(classify_input("exit "), InputAction::Send(_)));
        assert!(matches!(classify_input("Exit"), InputAction::Send(_)));
        assert!(matches!(classify_input("exit now"), InputAction::Send(_)));
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(classify_input(""), InputAction::Reject(_)));
    }

    #[test]
    fn length_boundary() {
        let at_limit = "a".repeat(MAX_MESSAGE_CHARS);
        assert!(matches!(classify_input(&at_limit), InputAction::Send(_)));

        let over_limit = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(matches!(classify_input(&over_limit), InputAction::Reject(_)));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 500 multibyte characters are within the limit even though the
        // byte length is well past it.
        let at_limit = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(at_limit.len() > MAX_MESSAGE_CHARS);
        assert!(matches!(classify_input(&at_limit), InputAction::Send(_)));
    }

    #[test]
    fn ordinary_message() {
        assert_eq!(
            classify_input("hello there"),
            InputAction::Send("hello there".to_string())
        );
    }
}
