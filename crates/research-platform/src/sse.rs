//! Incremental parser for `text/event-stream` payloads.
//!
//! `fetch()` hands us arbitrary byte chunks; a record boundary (blank
//! line) can land anywhere, so the parser buffers across `feed` calls
//! and only dispatches complete records.

/// One complete server-sent event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    /// Event name; `"message"` when the record carries none.
    pub event: String,
    /// Data lines joined with `\n`.
    pub data: String,
}

/// Streaming record reassembler. Feed it chunks, get back the records
/// completed so far.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &str) -> Vec<SseMessage> {
        self.buffer.push_str(chunk);

        let mut messages = Vec::new();
        while let Some((end, sep_len)) = record_end(&self.buffer) {
            let record = self.buffer[..end].to_string();
            self.buffer.drain(..end + sep_len);
            if let Some(message) = parse_record(&record) {
                messages.push(message);
            }
        }
        messages
    }
}

/// Position and length of the first record separator (LF-LF or CRLF-CRLF).
fn record_end(buffer: &str) -> Option<(usize, usize)> {
    let lf = buffer.find("\n\n").map(|i| (i, 2));
    let crlf = buffer.find("\r\n\r\n").map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn parse_record(record: &str) -> Option<SseMessage> {
    let mut event = String::new();
    let mut data_lines: Vec<&str> = Vec::new();

    for line in record.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.starts_with(':') {
            // comment / keep-alive
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => event = value.to_string(),
            "data" => data_lines.push(value),
            _ => {}
        }
    }

    if event.is_empty() && data_lines.is_empty() {
        return None;
    }
    Some(SseMessage {
        event: if event.is_empty() {
            "message".to_string()
        } else {
            event
        },
        data: data_lines.join("\n"),
    })
}
