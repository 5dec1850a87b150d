//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{ClientConfig, domain, error::ClientError};

use super::session::run_client_session;

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the client with reconnection logic
///
/// The room is rejoined on every reconnect. Returns an error once the
/// reconnection attempts are exhausted or the error cannot be retried.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    domain::validate_url(&config.url)?;

    let mut input = spawn_readline(config.peer_id.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' in room '{}' (attempt {}/{})",
            config.url,
            config.peer_id,
            config.room,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&config, &mut input).await {
            Ok(()) => {
                // If the session ended normally (user exit), don't reconnect
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !domain::should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS)
                {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        reconnect_count
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}

/// Spawn a blocking thread for rustyline (synchronous readline)
///
/// The thread outlives individual sessions, so input typed while reconnecting
/// is delivered to the next session. The channel closes on Ctrl+C or Ctrl+D.
fn spawn_readline(peer_id: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", peer_id);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
