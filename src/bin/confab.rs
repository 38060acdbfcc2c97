//! Interactive chat client for OpenAI-compatible completion APIs.
//!
//! This binary reads a line at a time, forwards it to the completion
//! endpoint with bounded retries, prints the reply and token counts, and
//! reprints cumulative statistics and the running transcript after every
//! turn.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! confab
//!
//! # Specify a model
//! confab --model gpt-4o-mini
//!
//! # Loosen the retry policy
//! confab --max-attempts 5 --retry-delay-ms 2000
//!
//! # Disable colors (useful for piping output)
//! confab --no-color
//! ```
//!
//! The OPENAI_API_KEY environment variable must be set; type `exit` to
//! quit.

use std::time::Instant;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use confab::chat::{
    ChatArgs, ChatConfig, ChatSession, InputAction, PlainTextRenderer, Renderer, classify_input,
};
use confab::{OpenAi, Outcome, dispatch, interpret};

/// Main entry point for the confab application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("confab [OPTIONS]");
    let config = ChatConfig::from(args);
    let policy = config.retry_policy();

    let client = OpenAi::new(None)?.with_model(config.model.clone());
    let mut session = ChatSession::new();
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Chatbot (model: {}, type 'exit' to quit)", client.model());

    loop {
        match rl.readline("> ") {
            Ok(line) => match classify_input(&line) {
                InputAction::Exit => {
                    println!("Goodbye!");
                    break;
                }
                InputAction::Reject(reason) => {
                    renderer.print_error(reason);
                }
                InputAction::Send(message) => {
                    let _ = rl.add_history_entry(&message);

                    let start = Instant::now();
                    let body = dispatch(&client, &message, &policy).await;
                    let elapsed = start.elapsed();

                    match interpret(&body) {
                        Outcome::ApiError(api_message) => {
                            // An API error leaves the transcript and the
                            // counters alone; back to the prompt.
                            renderer.print_api_error(&api_message);
                            continue;
                        }
                        Outcome::Completion { reply, usage } => {
                            renderer.print_reply(&reply, &usage);
                            session.record_exchange(&message, &reply, elapsed);
                        }
                        Outcome::Malformed(diagnostic) => {
                            renderer.print_notice(&diagnostic);
                        }
                    }

                    renderer.print_stats(&session.stats());
                    renderer.print_transcript(session.transcript());
                }
            },
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at the prompt - re-prompt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {err}"));
                break;
            }
        }
    }

    Ok(())
}
