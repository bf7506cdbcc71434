//! Interactive chat loop.
//!
//! A blocking read-eval-print cycle over stdin. Three inputs are recognized
//! after trimming surrounding whitespace: a case-insensitive `exit`
//! terminates the loop, a case-insensitive `REFEED_REPO` re-runs the feed
//! loop without sending anything to the model, and everything else is
//! forwarded as a user prompt with the full conversation history.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::client::ModelClient;
use crate::config::Config;
use crate::feed;
use crate::session::Session;

/// The three-way dispatch for one line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Terminate the loop without appending anything.
    Exit,
    /// Re-run the feed loop; nothing is sent to the model this turn.
    Refeed,
    /// Forwarded to the model as a user entry.
    Prompt(String),
}

/// Classify one raw console line.
pub fn classify_input(raw: &str) -> Input {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("exit") {
        Input::Exit
    } else if trimmed.eq_ignore_ascii_case("refeed_repo") {
        Input::Refeed
    } else {
        Input::Prompt(trimmed.to_string())
    }
}

/// Run the chat loop until `exit` or end of input.
///
/// Blocks on console input and on the remote model's response each turn.
pub async fn run_chat(config: &Config, client: &ModelClient, session: &mut Session) -> Result<()> {
    println!(
        "Repo loaded. Type your prompt. Type 'REFEED_REPO' to reload modified files. Type 'exit' to quit."
    );

    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("\nYour prompt: ");
            std::io::stdout().flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            // End of input behaves like `exit`.
            None => break,
        };

        match classify_input(&line) {
            Input::Exit => break,
            Input::Refeed => {
                let report = feed::run_feed(config, client, session).await?;
                feed::print_report(&report);
            }
            Input::Prompt(prompt) => {
                session.push_user(prompt);
                session.enforce_retention(&config.retention);
                let reply = client.complete(session.entries()).await?;
                println!("\nAssistant:\n{}", reply);
                session.push_assistant(reply);
            }
        }
    }

    Ok(())
}
