use pretty_assertions::assert_eq;
use scout_engine::{dispatch_frame, Frame, FrameBuffer, SessionEvent};

#[test]
fn whole_frames_are_parsed_from_one_chunk() {
    let mut buffer = FrameBuffer::new();
    let frames = buffer.push(
        b"event: progress\ndata: {\"percent\":10}\n\nevent: end\ndata: {}\n\n",
    );

    assert_eq!(
        frames,
        vec![
            Frame {
                event: "progress".to_string(),
                data: "{\"percent\":10}".to_string(),
            },
            Frame {
                event: "end".to_string(),
                data: "{}".to_string(),
            },
        ]
    );
    assert_eq!(buffer.pending_len(), 0);
}

#[test]
fn frames_split_across_chunks_are_buffered() {
    let mut buffer = FrameBuffer::new();

    assert!(buffer.push(b"event: prog").is_empty());
    assert!(buffer.push(b"ress\ndata: {\"perce").is_empty());
    let frames = buffer.push(b"nt\":55,\"message\":\"enriching\"}\n\n");

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].event, "progress");
    assert_eq!(frames[0].data, "{\"percent\":55,\"message\":\"enriching\"}");
}

#[test]
fn crlf_line_endings_are_accepted() {
    let mut buffer = FrameBuffer::new();
    let frames = buffer.push(b"event: cancelled\r\ndata: {}\r\n\r\n");

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].event, "cancelled");
}

#[test]
fn multi_line_data_is_joined() {
    let mut buffer = FrameBuffer::new();
    let frames = buffer.push(b"event: progress\ndata: line one\ndata: line two\n\n");

    assert_eq!(frames[0].data, "line one\nline two");
}

#[test]
fn comment_keepalives_are_skipped() {
    let mut buffer = FrameBuffer::new();
    let frames = buffer.push(b": keep-alive\n\nevent: end\ndata: {}\n\n");

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].event, "end");
}

#[test]
fn data_without_event_name_defaults_to_message() {
    let mut buffer = FrameBuffer::new();
    let frames = buffer.push(b"data: {}\n\n");

    assert_eq!(frames[0].event, "message");
}

#[test]
fn incomplete_trailing_frame_stays_pending() {
    let mut buffer = FrameBuffer::new();
    let frames = buffer.push(b"event: result\ndata: {\"success\":true");

    assert!(frames.is_empty());
    assert!(buffer.pending_len() > 0);
}

#[test]
fn known_events_dispatch_to_typed_variants() {
    let progress = dispatch_frame(&Frame {
        event: "progress".to_string(),
        data: "{\"percent\":40,\"message\":\"crawling\"}".to_string(),
    });
    match progress {
        Some(SessionEvent::Progress(payload)) => {
            assert_eq!(payload.percent, 40);
            assert_eq!(payload.message, "crawling");
        }
        other => panic!("unexpected dispatch: {other:?}"),
    }

    let seo = dispatch_frame(&Frame {
        event: "seoSessionId".to_string(),
        data: "{\"seoSessionId\":\"abc\"}".to_string(),
    });
    match seo {
        Some(SessionEvent::SeoSession(payload)) => {
            assert_eq!(payload.seo_session_id, "abc");
        }
        other => panic!("unexpected dispatch: {other:?}"),
    }

    assert_eq!(
        dispatch_frame(&Frame {
            event: "cancelled".to_string(),
            data: String::new(),
        }),
        Some(SessionEvent::Cancelled)
    );
    assert_eq!(
        dispatch_frame(&Frame {
            event: "end".to_string(),
            data: String::new(),
        }),
        Some(SessionEvent::Ended)
    );
}

#[test]
fn error_frames_accept_either_reason_field() {
    let from_error = dispatch_frame(&Frame {
        event: "error".to_string(),
        data: "{\"error\":\"crawler crashed\"}".to_string(),
    });
    assert_eq!(
        from_error,
        Some(SessionEvent::Error {
            reason: "crawler crashed".to_string()
        })
    );

    let from_message = dispatch_frame(&Frame {
        event: "error".to_string(),
        data: "{\"message\":\"too many pages\"}".to_string(),
    });
    assert_eq!(
        from_message,
        Some(SessionEvent::Error {
            reason: "too many pages".to_string()
        })
    );
}

#[test]
fn malformed_json_in_a_frame_is_dropped_not_fatal() {
    let bad = dispatch_frame(&Frame {
        event: "progress".to_string(),
        data: "{not json".to_string(),
    });
    assert_eq!(bad, None);

    // The next frame still dispatches normally.
    let good = dispatch_frame(&Frame {
        event: "progress".to_string(),
        data: "{\"percent\":60}".to_string(),
    });
    assert!(matches!(good, Some(SessionEvent::Progress(_))));
}

#[test]
fn unknown_event_names_are_ignored() {
    let unknown = dispatch_frame(&Frame {
        event: "heartbeat".to_string(),
        data: "{}".to_string(),
    });
    assert_eq!(unknown, None);
}
