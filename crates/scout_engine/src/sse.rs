use bytes::{Buf, BytesMut};

/// One parsed server-sent frame: an event name plus its raw data payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub event: String,
    pub data: String,
}

/// Incremental frame assembler. Chunks arrive at arbitrary boundaries; a
/// frame is released only once its terminating blank line is buffered, and
/// whatever trails the last delimiter stays queued for the next chunk.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: BytesMut,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every complete frame it unlocked.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Frame> {
        self.buf.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(end) = find_frame_end(&self.buf) {
            let raw = self.buf.split_to(end.text_len);
            self.buf.advance(end.delimiter_len);
            let text = String::from_utf8_lossy(&raw);
            if let Some(frame) = parse_frame(&text) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Bytes still waiting for a frame delimiter. An incomplete trailing
    /// frame at stream end is discarded, not treated as an error.
    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }
}

struct FrameEnd {
    text_len: usize,
    delimiter_len: usize,
}

/// Frames end at a blank line: `\n\n` or `\r\n\r\n`.
fn find_frame_end(buf: &[u8]) -> Option<FrameEnd> {
    for i in 0..buf.len() {
        if buf[i] != b'\n' {
            continue;
        }
        if i + 1 < buf.len() && buf[i + 1] == b'\n' {
            return Some(FrameEnd {
                text_len: i + 1,
                delimiter_len: 1,
            });
        }
        if i + 2 < buf.len() && buf[i + 1] == b'\r' && buf[i + 2] == b'\n' {
            return Some(FrameEnd {
                text_len: i + 1,
                delimiter_len: 2,
            });
        }
    }
    None
}

/// Parse the text of one frame into its event name and joined data lines.
/// Comment lines and fields other than `event`/`data` are skipped. A frame
/// with neither field (a keep-alive) yields `None`.
fn parse_frame(text: &str) -> Option<Frame> {
    let mut event = None;
    let mut data_lines: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.starts_with(':') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("event:") {
            event = Some(rest.strip_prefix(' ').unwrap_or(rest).to_string());
        } else if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    if event.is_none() && data_lines.is_empty() {
        return None;
    }
    Some(Frame {
        event: event.unwrap_or_else(|| "message".to_string()),
        data: data_lines.join("\n"),
    })
}
