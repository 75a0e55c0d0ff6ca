//! Test doubles for endpoints, plus log capture.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::Level;

use super::{Endpoint, FetchError};

/// Replays canned results in order, then repeats the last one forever.
pub(crate) struct ScriptedEndpoint {
    script: VecDeque<Result<Value, FetchError>>,
    last: Result<Value, FetchError>,
}

impl ScriptedEndpoint {
    pub(crate) fn new(script: Vec<Result<Value, FetchError>>) -> Self {
        Self {
            script: script.into(),
            last: Err(FetchError::Transport("empty script".into())),
        }
    }

    /// Always refuses the connection.
    pub(crate) fn failing() -> Self {
        Self::new(vec![Err(FetchError::Transport("connection refused".into()))])
    }
}

impl Endpoint for ScriptedEndpoint {
    fn fetch(&mut self) -> Result<Value, FetchError> {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last.clone()
    }

    fn describe(&self) -> &str {
        "scripted"
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with every log record at any level written to a string.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let text = buffer
        .0
        .lock()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();
    (result, text)
}
