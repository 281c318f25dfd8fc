//! Console front end: stdin commands in, plain text out.

pub mod commands;
pub mod renderer;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub use commands::{parse_command, CommandParseError, HELP};
pub use renderer::ConsoleView;

use crate::application::UiIntent;

/// Read commands from stdin until EOF or `quit`, forwarding parsed intents.
pub async fn read_stdin(intents: mpsc::Sender<UiIntent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stdin");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(intent) => {
                let quit = intent == UiIntent::Quit;
                if intents.send(intent).await.is_err() || quit {
                    break;
                }
            }
            Err(e) => eprintln!("{e}\n{HELP}"),
        }
    }
}
