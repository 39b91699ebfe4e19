//! [`CommandSource`] that reads newline-delimited JSON commands from any
//! buffered reader (stdin in headless mode).
//!
//! # Wire format
//!
//! One JSON-encoded [`DockCommand`] per line:
//!
//! ```json
//! {"AddShortcut":{"name":"Notes","path":"/home/me/notes.txt"}}
//! "ToggleSide"
//! {"Launch":0}
//! ```
//!
//! Blank lines are skipped; lines that are not UTF-8 or fail to parse are
//! logged and skipped.

use crate::command::DockCommand;
use crate::traits::CommandSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader, Stdin};
use std::sync::mpsc;

/// A [`CommandSource`] over a [`BufRead`].
///
/// Runs until end of input, a read error, or the sink being dropped.
pub struct LineSource<R> {
    reader: R,
}

/// Errors produced by the line source.
#[derive(Debug, thiserror::Error)]
pub enum LineSourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl<R: BufRead + Send> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LineSource<BufReader<Stdin>> {
    /// A source reading the process's standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead + Send> CommandSource for LineSource<R> {
    type Error = LineSourceError;

    fn run(&mut self, sink: mpsc::Sender<DockCommand>) -> Result<(), Self::Error> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                info!("end of command input");
                return Ok(());
            }
            let text = match std::str::from_utf8(&buf) {
                Ok(text) => text.trim(),
                Err(e) => {
                    error!("bad command: {}: {}", String::from_utf8_lossy(&buf).trim(), e);
                    continue;
                }
            };
            if text.is_empty() {
                continue;
            }
            match serde_json::from_str::<DockCommand>(text) {
                Ok(cmd) => {
                    debug!("received {:?}", cmd);
                    if sink.send(cmd).is_err() {
                        info!("sink closed, shutting down");
                        return Ok(());
                    }
                }
                Err(e) => {
                    error!("bad command: {}: {}", text, e);
                }
            }
        }
    }
}
