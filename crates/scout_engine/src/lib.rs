//! Scout engine: streaming transport, event dispatch, and effect execution.
mod auth;
mod cancel;
mod dispatch;
mod engine;
mod ip;
mod persist;
mod poll;
mod session_id;
mod sse;
mod transport;
mod types;

pub use auth::{AllowAllValidator, TokenValidator};
pub use cancel::{CancelClient, CancelError, CancelSettings};
pub use dispatch::dispatch_frame;
pub use engine::{EngineConfig, EngineHandle};
pub use ip::lookup_public_ip;
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use poll::{poll_seo_until_terminal, PollSettings};
pub use session_id::new_session_id;
pub use sse::{Frame, FrameBuffer};
pub use transport::{
    AnalysisRequest, ChannelEventSink, Credentials, EventSink, SseStreamTransport, StreamSettings,
    StreamTransport,
};
pub use types::{
    AnalysisResultPayload, AsyncPromptPayload, EngineEvent, ErrorPayload, ProgressPayload,
    SeoIssuePayload, SeoPollOutcome, SeoReportPayload, SeoSessionPayload, SeoStatus,
    SeoStatusResponse, SessionEvent, TransportError,
};
