use scout_logging::{scout_debug, scout_warn};

use crate::sse::Frame;
use crate::types::{ErrorPayload, SessionEvent};

/// Map one raw frame to a typed session event.
///
/// Unknown event names and malformed JSON payloads yield `None`: a single
/// bad frame never disturbs the rest of the stream.
pub fn dispatch_frame(frame: &Frame) -> Option<SessionEvent> {
    match frame.event.as_str() {
        "progress" => parse_payload(frame).map(SessionEvent::Progress),
        "asyncPrompt" => parse_payload(frame).map(SessionEvent::AsyncPrompt),
        "seoSessionId" => parse_payload(frame).map(SessionEvent::SeoSession),
        "result" => parse_payload(frame).map(SessionEvent::Result),
        "error" => parse_payload(frame).map(|payload: ErrorPayload| SessionEvent::Error {
            reason: payload.reason(),
        }),
        "cancelled" => Some(SessionEvent::Cancelled),
        "end" => Some(SessionEvent::Ended),
        other => {
            scout_debug!("ignoring unknown stream event {other:?}");
            None
        }
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(frame: &Frame) -> Option<T> {
    match serde_json::from_str(&frame.data) {
        Ok(value) => Some(value),
        Err(err) => {
            scout_warn!("dropping malformed {} frame: {}", frame.event, err);
            None
        }
    }
}
