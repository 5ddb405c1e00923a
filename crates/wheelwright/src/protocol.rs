//! Line protocol of the control socket: one intent per line (see
//! [`Intent`]'s `FromStr`), answered by `ok` or `error: <reason>`.

use crate::intent::Intent;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/chakra.sock";
pub const REPLY_OK: &str = "ok";
const ERROR_PREFIX: &str = "error: ";

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Failed to connect to chakra at {}: {source}. Is chakra running?", path.display())]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Socket error: {0}")]
    Io(#[from] std::io::Error),
    #[error("chakra refused the command: {0}")]
    Refused(String),
    #[error("chakra closed the connection without replying")]
    NoReply,
}

/// Formats the reply for a handled line.
pub fn reply<E: std::fmt::Display>(result: &Result<(), E>) -> String {
    match result {
        Ok(()) => REPLY_OK.to_string(),
        Err(e) => format!("{}{}", ERROR_PREFIX, e),
    }
}

/// Interprets a reply line received from the server.
pub fn parse_reply(line: &str) -> Result<(), ProtocolError> {
    match line.trim() {
        REPLY_OK => Ok(()),
        "" => Err(ProtocolError::NoReply),
        other => Err(ProtocolError::Refused(
            other.strip_prefix(ERROR_PREFIX).unwrap_or(other).to_string(),
        )),
    }
}

/// Sends one intent and waits for its reply.
pub fn send(path: impl AsRef<Path>, intent: Intent) -> Result<(), ProtocolError> {
    let path = path.as_ref();
    let mut stream = UnixStream::connect(path).map_err(|source| ProtocolError::Connect {
        path: path.to_path_buf(),
        source,
    })?;

    writeln!(stream, "{}", intent)?;
    stream.flush()?;

    let mut line = String::new();
    BufReader::new(stream).read_line(&mut line)?;
    parse_reply(&line)
}
