//! Incremental server-sent-events parser.
//!
//! `/chat/stream` delivers frames over a long-lived response body. Chunks can
//! split a frame anywhere, so the parser buffers bytes and only dispatches a
//! frame once its terminating blank line has arrived.

/// One dispatched SSE frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Event name; `message` when the stream omits the `event:` field.
    pub event: String,
    /// Concatenated `data:` lines, newline-joined.
    pub data: String,
}

const DEFAULT_EVENT: &str = "message";

#[derive(Default)]
pub struct SseParser {
    buf: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one body chunk, returning every frame completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buf.extend_from_slice(chunk);
        let mut frames = Vec::new();

        // Only complete lines are consumed; a partial tail stays buffered so
        // multi-byte characters split across chunks reassemble intact.
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line_bytes: Vec<u8> = self.buf.drain(..=pos).collect();
            let mut line = String::from_utf8_lossy(&line_bytes).into_owned();
            if line.ends_with('\n') {
                line.pop();
            }
            if line.ends_with('\r') {
                line.pop();
            }
            if let Some(frame) = self.take_line(&line) {
                frames.push(frame);
            }
        }
        frames
    }

    fn take_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            // Blank line dispatches the accumulated frame, if any.
            if self.data.is_empty() && self.event.is_none() {
                return None;
            }
            let frame = SseFrame {
                event: self.event.take().unwrap_or_else(|| DEFAULT_EVENT.into()),
                data: self.data.join("\n"),
            };
            self.data.clear();
            return Some(frame);
        }
        if line.starts_with(':') {
            // Comment line; keep-alive pings arrive this way.
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // `id` and `retry` are legal fields we have no use for.
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_frame() {
        let mut parser = SseParser::new();
        let frames = parser.feed(b"event: message\ndata: {\"x\":1}\n\n");
        assert_eq!(
            frames,
            vec![SseFrame {
                event: "message".into(),
                data: "{\"x\":1}".into(),
            }]
        );
    }

    #[test]
    fn frame_split_across_chunks_is_reassembled() {
        let mut parser = SseParser::new();
        assert!(parser.feed(b"event: assistant_er").is_empty());
        assert!(parser.feed(b"ror\ndata: {\"error\":").is_empty());
        let frames = parser.feed(b"\"boom\"}\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "assistant_error");
        assert_eq!(frames[0].data, "{\"error\":\"boom\"}");
    }

    #[test]
    fn default_event_name_is_message() {
        let mut parser = SseParser::new();
        let frames = parser.feed(b"data: hello\n\n");
        assert_eq!(frames[0].event, "message");
    }

    #[test]
    fn comments_and_blank_lines_produce_nothing() {
        let mut parser = SseParser::new();
        assert!(parser.feed(b": keep-alive\n\n\n").is_empty());
    }

    #[test]
    fn multiple_data_lines_are_newline_joined() {
        let mut parser = SseParser::new();
        let frames = parser.feed(b"data: a\ndata: b\n\n");
        assert_eq!(frames[0].data, "a\nb");
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let mut parser = SseParser::new();
        let frames = parser.feed(b"event: ping\r\ndata: {}\r\n\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "ping");
        assert_eq!(frames[0].data, "{}");
    }

    #[test]
    fn two_frames_in_one_chunk() {
        let mut parser = SseParser::new();
        let frames = parser.feed(b"data: one\n\ndata: two\n\n");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].data, "one");
        assert_eq!(frames[1].data, "two");
    }
}
