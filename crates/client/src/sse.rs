//! Server-sent event decoding.
//!
//! Responsibilities:
//! - Incrementally decode `text/event-stream` bytes into [`SseMessage`]s.
//! - Wrap a streaming `reqwest::Response` as a `Stream` of messages.
//!
//! Does NOT handle:
//! - Reconnecting (the caller decides, using the last `retry:` value).
//! - Interpreting `data` payloads (progress events are JSON, parsed by the caller).
//!
//! Invariants:
//! - Bytes may arrive split anywhere, including inside a UTF-8 sequence or a CRLF pair.
//! - A message is dispatched only on a blank line; a trailing partial message at EOF is dropped.
//! - Messages with no `data:` field are not dispatched (comments and keepalives are swallowed).
//! - A UTF-8 byte order mark at the very start of the stream is dropped.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};

use crate::error::{ClientError, Result};

/// Event type of messages sent without an `event:` field.
pub const DEFAULT_EVENT: &str = "message";

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// One dispatched server-sent event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseMessage {
    /// Event type; `message` when the server sent none.
    pub event: String,
    /// Data lines joined with `\n`.
    pub data: String,
    /// Last event id seen on the stream.
    pub id: Option<String>,
    /// Reconnection delay requested by the server.
    pub retry: Option<Duration>,
}

impl SseMessage {
    /// Whether this is an untyped message, the only kind `onmessage` handlers see.
    pub fn is_default_event(&self) -> bool {
        self.event == DEFAULT_EVENT
    }
}

/// Incremental decoder for the event-stream format.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    /// A chunk ended on `\r`; a leading `\n` in the next chunk belongs to it.
    pending_cr: bool,
    /// The stream start has been checked for a byte order mark.
    bom_checked: bool,
    event: Option<String>,
    data: Vec<String>,
    last_id: Option<String>,
    retry: Option<Duration>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent `retry:` value, if the server sent one.
    pub fn retry(&self) -> Option<Duration> {
        self.retry
    }

    /// Feed bytes and return every message completed by them.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        let mut chunk = chunk;
        if self.pending_cr && !chunk.is_empty() {
            self.pending_cr = false;
            if chunk.first() == Some(&b'\n') {
                chunk = &chunk[1..];
            }
        }
        self.buffer.extend_from_slice(chunk);

        if !self.bom_checked {
            if self.buffer.len() < BOM.len() && BOM.starts_with(&self.buffer) {
                return Vec::new();
            }
            if self.buffer.starts_with(BOM) {
                self.buffer.drain(..BOM.len());
            }
            self.bom_checked = true;
        }

        let mut messages = Vec::new();
        loop {
            let Some(pos) = self.buffer.iter().position(|b| *b == b'\n' || *b == b'\r') else {
                break;
            };
            let terminator = self.buffer[pos];
            let mut consumed = pos + 1;
            if terminator == b'\r' {
                match self.buffer.get(pos + 1) {
                    Some(b'\n') => consumed += 1,
                    Some(_) => {}
                    None => self.pending_cr = true,
                }
            }
            let line: Vec<u8> = self.buffer.drain(..consumed).take(pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(message) = self.process_line(&line) {
                messages.push(message);
            }
        }
        messages
    }

    fn process_line(&mut self, line: &str) -> Option<SseMessage> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            "retry" => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.retry = Some(Duration::from_millis(ms));
                }
            }
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseMessage> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseMessage {
            event: event.unwrap_or_else(|| DEFAULT_EVENT.to_string()),
            data,
            id: self.last_id.clone(),
            retry: self.retry,
        })
    }
}

/// A stream of [`SseMessage`]s read from an HTTP response body.
pub struct EventStream {
    inner: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    decoder: SseDecoder,
    ready: VecDeque<SseMessage>,
    done: bool,
}

impl EventStream {
    pub fn new(response: reqwest::Response) -> Self {
        Self {
            inner: response
                .bytes_stream()
                .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
                .boxed(),
            decoder: SseDecoder::new(),
            ready: VecDeque::new(),
            done: false,
        }
    }

    /// Most recent `retry:` value sent on this stream.
    pub fn retry(&self) -> Option<Duration> {
        self.decoder.retry()
    }
}

impl Stream for EventStream {
    type Item = Result<SseMessage>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(message) = self.ready.pop_front() {
                return Poll::Ready(Some(Ok(message)));
            }
            if self.done {
                return Poll::Ready(None);
            }
            match self.inner.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let messages = self.decoder.push(&chunk);
                    self.ready.extend(messages);
                }
                Poll::Ready(Some(Err(e))) => {
                    self.done = true;
                    return Poll::Ready(Some(Err(ClientError::HttpError(e))));
                }
                Poll::Ready(None) => {
                    self.done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
