//! Utterance capture worker.
//!
//! Speech capture and transcription are external collaborators; this worker
//! reads already-transcribed utterances line by line and feeds them into the
//! single-producer queue the controller drains. The stop flag is a request
//! observed between phrases, not a hard interrupt of an in-flight read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Phrase that asks the worker to stop listening.
const STOP_PHRASE: &str = "stop listening";

/// Drain `reader` into the utterance queue until EOF, a stop request, or a
/// dropped receiver. Blank lines are not phrases and are skipped.
pub async fn capture_loop<R>(reader: R, tx: mpsc::Sender<String>, stop: Arc<AtomicBool>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        if stop.load(Ordering::Relaxed) {
            info!("Capture stop requested");
            break;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("Capture source reached EOF");
                break;
            }
            Err(e) => {
                debug!(error = %e, "Capture read failed");
                break;
            }
        };

        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }
        if utterance.eq_ignore_ascii_case(STOP_PHRASE) {
            stop.store(true, Ordering::Relaxed);
            info!("Stop phrase heard, capture ending");
            break;
        }

        if tx.send(utterance.to_string()).await.is_err() {
            debug!("Utterance queue closed, capture ending");
            break;
        }
    }
}

/// Spawn the capture worker over standard input.
pub fn spawn_stdin_capture(tx: mpsc::Sender<String>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        capture_loop(BufReader::new(tokio::io::stdin()), tx, stop).await;
    })
}
