use crate::events::AppEvent;
use async_channel::Sender;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use wheelwright::intent::{Intent, ParseIntentError};
use wheelwright::protocol;

pub async fn run_server(tx: Sender<AppEvent>, path: PathBuf) {
    // Cleanup old socket if it exists
    if std::fs::metadata(&path).is_ok() {
        let _ = std::fs::remove_file(&path);
    }

    let listener = match UnixListener::bind(&path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", path.display(), e);
            return;
        }
    };
    log::info!("Listening for commands on {}", path.display());

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let (reader, mut writer) = stream.into_split();
                    let mut lines = BufReader::new(reader).lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if !handle_line(&line, &tx, &mut writer).await {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Forwards one command line to the UI and answers it. Returns `false` once
/// the connection or the UI is gone.
async fn handle_line<W: AsyncWrite + Unpin>(
    line: &str,
    tx: &Sender<AppEvent>,
    writer: &mut W,
) -> bool {
    let parsed: Result<Intent, ParseIntentError> = line.parse();
    if let Ok(intent) = parsed
        && tx.send(AppEvent::Intent(intent)).await.is_err()
    {
        return false;
    }
    if let Err(e) = &parsed {
        log::debug!("Rejected command {:?}: {}", line, e);
    }

    let reply = protocol::reply(&parsed.map(|_| ()));
    writer
        .write_all(format!("{}\n", reply).as_bytes())
        .await
        .is_ok()
}

pub fn remove_socket(path: &Path) {
    if path.exists()
        && let Err(e) = std::fs::remove_file(path)
    {
        log::warn!("Failed to remove socket {}: {}", path.display(), e);
    }
}
