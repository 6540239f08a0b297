//! Binary entry point: initialize once, then drive one chat session over
//! stdin. Exits non-zero on any fatal startup error.

use std::io::{BufRead, Write};

use parley::{initialize, IncomingMessage, SessionId, SessionReply};
use pconfig::config_path_from_env;
use tracing::error;

#[tokio::main]
async fn main() {
    let config_path = config_path_from_env();

    let context = match initialize(&config_path) {
        Ok(context) => context,
        Err(err) => {
            // Logging may not be installed yet when config loading failed.
            eprintln!("startup failed: {err}");
            error!(%err, "startup failed");
            std::process::exit(1);
        }
    };

    let mut session = context.new_session(SessionId::new("stdin"));
    if let Err(err) = session.on_chat_start().await {
        error!(%err, "session start failed");
        std::process::exit(1);
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        if write!(stdout, "> ").and_then(|_| stdout.flush()).is_err() {
            break;
        }

        let Some(Ok(line)) = lines.next() else {
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        match session.on_message(IncomingMessage::new(line)).await {
            Ok(SessionReply::Answer(answer)) => {
                let _ = writeln!(stdout, "{answer}");
            }
            Ok(SessionReply::Failure(failure)) => {
                let _ = writeln!(stdout, "error: {failure}");
            }
            Err(err) => {
                error!(%err, "session rejected message");
                break;
            }
        }
    }
}
