use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use scout_logging::{scout_debug, scout_info};
use tokio_util::sync::CancellationToken;

use crate::auth::TokenValidator;
use crate::dispatch::dispatch_frame;
use crate::sse::FrameBuffer;
use crate::types::{EngineEvent, SessionEvent, TransportError};

#[derive(Debug, Clone)]
pub struct StreamSettings {
    /// Full URL of the analysis stream endpoint.
    pub endpoint: String,
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Anonymous,
    Bearer(String),
}

/// Fully resolved parameters for one stream open. `user_ip` is optional
/// enrichment; the request is valid without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub session_id: String,
    pub url: String,
    pub bots: Vec<String>,
    pub ai_enrichment: bool,
    pub user_ip: Option<String>,
}

pub trait EventSink: Send + Sync {
    fn deliver(&self, session_id: &str, event: SessionEvent);
}

/// Sink forwarding dispatched events over a channel to the frontend bridge.
pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn deliver(&self, session_id: &str, event: SessionEvent) {
        let _ = self.tx.send(EngineEvent::Stream {
            session_id: session_id.to_string(),
            event,
        });
    }
}

#[async_trait]
pub trait StreamTransport: Send + Sync {
    /// Run one stream to completion, delivering each dispatched event to
    /// `sink`. Returns once the server closes the stream or `cancel` fires;
    /// a stream that closes without a terminal event is an error so the
    /// state machine is never left hanging.
    async fn run(
        &self,
        request: &AnalysisRequest,
        credentials: &Credentials,
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Result<(), TransportError>;
}

/// Single transport for both the anonymous and the authenticated path.
/// Frames are parsed manually from the chunked response body, so a bearer
/// header can always be attached to the same request shape.
pub struct SseStreamTransport {
    settings: StreamSettings,
    validator: Arc<dyn TokenValidator>,
}

impl SseStreamTransport {
    pub fn new(settings: StreamSettings, validator: Arc<dyn TokenValidator>) -> Self {
        Self {
            settings,
            validator,
        }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        // No overall request timeout: the stream legitimately stays open
        // for the whole analysis.
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .build()
            .map_err(|err| TransportError::Connect(err.to_string()))
    }
}

#[async_trait]
impl StreamTransport for SseStreamTransport {
    async fn run(
        &self,
        request: &AnalysisRequest,
        credentials: &Credentials,
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Result<(), TransportError> {
        if let Credentials::Bearer(token) = credentials {
            // An invalid token short-circuits before any request is made.
            if !self.validator.validate(token).await {
                return Err(TransportError::Auth);
            }
        }

        let client = self.build_client()?;
        let bots = request.bots.join(",");
        let mut http = client.get(&self.settings.endpoint).query(&[
            ("url", request.url.as_str()),
            ("bots", bots.as_str()),
            (
                "aiEnrichment",
                if request.ai_enrichment { "true" } else { "false" },
            ),
            ("sessionId", request.session_id.as_str()),
        ]);
        if let Some(ip) = &request.user_ip {
            http = http.query(&[("userIP", ip.as_str())]);
        }
        if let Credentials::Bearer(token) = credentials {
            http = http.bearer_auth(token);
        }

        let response = http
            .send()
            .await
            .map_err(|err| TransportError::Connect(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }

        scout_info!("stream open for session {}", request.session_id);
        let mut buffer = FrameBuffer::new();
        let mut saw_terminal = false;
        let mut body = response.bytes_stream();
        'read: loop {
            let chunk = tokio::select! {
                // Cancellation takes precedence over buffered frames.
                biased;
                _ = cancel.cancelled() => {
                    scout_debug!("stream for session {} closed locally", request.session_id);
                    return Ok(());
                }
                chunk = body.next() => chunk,
            };
            let Some(chunk) = chunk else {
                break 'read;
            };
            let chunk = chunk.map_err(|err| TransportError::Stream(err.to_string()))?;
            for frame in buffer.push(&chunk) {
                let Some(event) = dispatch_frame(&frame) else {
                    continue;
                };
                let terminal = event.is_terminal();
                let ended = matches!(event, SessionEvent::Ended);
                sink.deliver(&request.session_id, event);
                if terminal {
                    saw_terminal = true;
                }
                if ended {
                    break 'read;
                }
            }
        }

        if buffer.pending_len() > 0 {
            scout_debug!(
                "discarding {} bytes of incomplete trailing frame",
                buffer.pending_len()
            );
        }
        if saw_terminal {
            Ok(())
        } else {
            Err(TransportError::EndedWithoutTerminal)
        }
    }
}
