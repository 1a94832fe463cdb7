//! GraphQL-over-SSE subscription feed.
//!
//! Each of the three remote streams is one long-lived POST (distinct
//! connections mode): the subscription document goes up with
//! `Accept: text/event-stream`, and the response body is a stream of SSE
//! frames. `next` frames carry a GraphQL execution result whose single
//! top-level field is the stream's payload; a `complete` frame ends the
//! subscription.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::{debug, trace};

use notewire_core::{
    defaults, DeletedNote, Error, EventStreamKind, Note, NoteEvent, NoteEventStream, Result,
};

use crate::documents;
use crate::wire::{join_errors, GraphqlError, GraphqlRequest};

/// Open one subscription and return its typed event stream.
pub(crate) async fn open_event_stream(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: Option<&str>,
    stream: EventStreamKind,
) -> Result<NoteEventStream> {
    let (document, operation) = documents::subscription_document(stream);
    let body = GraphqlRequest {
        query: document,
        operation_name: operation,
        variables: None,
    };

    let mut request = client
        .post(endpoint)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .json(&body);
    if let Some(key) = api_key {
        request = request.header(defaults::API_KEY_HEADER, key);
    }

    let response = request
        .send()
        .await
        .map_err(|e| Error::Subscription(format!("{} connect failed: {}", operation, e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Subscription(format!(
            "backend returned {}: {}",
            status, body
        )));
    }

    debug!(
        subsystem = "client",
        component = "subscription",
        event_stream = stream.as_str(),
        "Subscription established"
    );

    Ok(event_stream_from_bytes(stream, response.bytes_stream()))
}

struct StreamState {
    bytes: Pin<Box<dyn Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Send>>,
    decoder: SseFrameDecoder,
    pending: VecDeque<Result<NoteEvent>>,
    done: bool,
}

/// Turn a raw SSE byte stream into typed note events.
///
/// Ends after a `complete` frame or when the connection drops; a transport
/// error is surfaced as the final item.
pub(crate) fn event_stream_from_bytes<S>(kind: EventStreamKind, bytes: S) -> NoteEventStream
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Send + 'static,
{
    let state = StreamState {
        bytes: Box::pin(bytes),
        decoder: SseFrameDecoder::new(),
        pending: VecDeque::new(),
        done: false,
    };

    Box::pin(futures::stream::unfold(state, move |mut st| async move {
        loop {
            if let Some(item) = st.pending.pop_front() {
                return Some((item, st));
            }
            if st.done {
                return None;
            }
            match st.bytes.next().await {
                None => {
                    st.done = true;
                }
                Some(Err(e)) => {
                    st.done = true;
                    st.pending
                        .push_back(Err(Error::Subscription(format!("stream error: {}", e))));
                }
                Some(Ok(chunk)) => {
                    for frame in st.decoder.push(&chunk) {
                        match parse_event_frame(kind, &frame) {
                            FrameOutcome::Event(event) => st.pending.push_back(Ok(event)),
                            FrameOutcome::Malformed(err) => st.pending.push_back(Err(err)),
                            FrameOutcome::Complete => {
                                st.done = true;
                                break;
                            }
                            FrameOutcome::Ignore => {}
                        }
                    }
                }
            }
        }
    }))
}

// =============================================================================
// SSE FRAME DECODING
// =============================================================================

/// Incremental SSE frame splitter.
///
/// Chunk boundaries are arbitrary; frames are only complete at a blank line.
/// Bytes are converted to text per complete frame, so a chunk boundary inside
/// a multi-byte character cannot corrupt it.
#[derive(Default)]
pub(crate) struct SseFrameDecoder {
    buf: Vec<u8>,
}

impl SseFrameDecoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning any frames completed by this chunk.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some((end, sep_len)) = find_frame_boundary(&self.buf) {
            let frame_bytes: Vec<u8> = self.buf.drain(..end + sep_len).take(end).collect();
            let frame = String::from_utf8_lossy(&frame_bytes).into_owned();
            if !frame.trim().is_empty() {
                frames.push(frame);
            }
        }
        frames
    }
}

/// Locate the next `\n\n` or `\r\n\r\n` frame separator.
fn find_frame_boundary(buf: &[u8]) -> Option<(usize, usize)> {
    let mut i = 0;
    while i + 1 < buf.len() {
        if buf[i] == b'\n' && buf[i + 1] == b'\n' {
            return Some((i, 2));
        }
        if buf[i] == b'\r' && i + 3 < buf.len() && &buf[i..i + 4] == b"\r\n\r\n" {
            return Some((i, 4));
        }
        i += 1;
    }
    None
}

// =============================================================================
// FRAME PARSING
// =============================================================================

enum FrameOutcome {
    Event(NoteEvent),
    Complete,
    Ignore,
    Malformed(Error),
}

#[derive(serde::Deserialize)]
struct ExecutionResult {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

/// Parse one SSE frame into an event outcome.
fn parse_event_frame(kind: EventStreamKind, frame: &str) -> FrameOutcome {
    let mut event_name: Option<&str> = None;
    let mut data = String::new();

    for line in frame.lines() {
        let line = line.trim_end_matches('\r');
        if line.starts_with(':') {
            // Keepalive comment
            continue;
        }
        if let Some(value) = line.strip_prefix("event:") {
            event_name = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("data:") {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(value.strip_prefix(' ').unwrap_or(value));
        }
    }

    match event_name.unwrap_or("next") {
        "complete" => FrameOutcome::Complete,
        "next" => {
            if data.is_empty() {
                return FrameOutcome::Ignore;
            }
            parse_next_payload(kind, &data)
        }
        other => {
            trace!(event = other, "Ignoring unrecognized SSE event");
            FrameOutcome::Ignore
        }
    }
}

/// Decode a `next` frame's execution result into a note event.
fn parse_next_payload(kind: EventStreamKind, data: &str) -> FrameOutcome {
    let result: ExecutionResult = match serde_json::from_str(data) {
        Ok(r) => r,
        Err(e) => {
            return FrameOutcome::Malformed(Error::Subscription(format!(
                "failed to parse event payload: {}",
                e
            )));
        }
    };

    if let Some(errors) = result.errors {
        if !errors.is_empty() {
            return FrameOutcome::Malformed(Error::Backend(join_errors(&errors)));
        }
    }

    let field = documents::subscription_field(kind);
    let payload = match result.data {
        Some(mut data_obj) => match data_obj.get_mut(field) {
            Some(value) => value.take(),
            None => {
                return FrameOutcome::Malformed(Error::Subscription(format!(
                    "event payload missing field {}",
                    field
                )));
            }
        },
        None => {
            return FrameOutcome::Malformed(Error::Subscription(
                "event payload carried no data".to_string(),
            ));
        }
    };

    // The backend sends null for filtered-out events; nothing to apply.
    if payload.is_null() {
        return FrameOutcome::Ignore;
    }

    let event = match kind {
        EventStreamKind::Created => {
            serde_json::from_value::<Note>(payload).map(NoteEvent::Created)
        }
        EventStreamKind::Updated => {
            serde_json::from_value::<Note>(payload).map(NoteEvent::Updated)
        }
        EventStreamKind::Deleted => {
            serde_json::from_value::<DeletedNote>(payload).map(|gone| NoteEvent::deleted(gone.id))
        }
    };

    match event {
        Ok(event) => FrameOutcome::Event(event),
        Err(e) => FrameOutcome::Malformed(Error::Subscription(format!(
            "malformed {} event: {}",
            kind.as_str(),
            e
        ))),
    }
}
