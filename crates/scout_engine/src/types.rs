use serde::Deserialize;
use thiserror::Error;

/// Wire payload of a `progress` frame. Percent is clamped by the state
/// machine, not here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPayload {
    pub percent: u8,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncPromptPayload {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSessionPayload {
    pub seo_session_id: String,
}

/// Terminal success payload of the primary stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResultPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pages_crawled: Option<u32>,
    #[serde(default)]
    pub extracted_paths: Vec<String>,
    #[serde(default)]
    pub page_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub ai_content: Option<String>,
}

/// Servers disagree on the field name for the failure reason; accept both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    pub fn reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_default()
    }
}

/// One SEO status poll response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoStatusResponse {
    #[serde(default)]
    pub success: bool,
    pub status: SeoStatus,
    #[serde(default)]
    pub data: Option<SeoReportPayload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoStatus {
    Running,
    Completed,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeoReportPayload {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub issues: Vec<SeoIssuePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoIssuePayload {
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub message: String,
}

/// Typed stream events after dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Progress(ProgressPayload),
    AsyncPrompt(AsyncPromptPayload),
    SeoSession(SeoSessionPayload),
    Result(AnalysisResultPayload),
    Error { reason: String },
    Cancelled,
    Ended,
}

impl SessionEvent {
    /// Whether this event settles the primary job.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionEvent::Result(_) | SessionEvent::Error { .. } | SessionEvent::Cancelled
        )
    }
}

/// Terminal outcome of one secondary poll loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SeoPollOutcome {
    Completed(SeoReportPayload),
    NotFound,
    TimedOut,
}

/// Events delivered from the engine worker to the frontend bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Stream {
        session_id: String,
        event: SessionEvent,
    },
    SeoPoll {
        session_id: String,
        outcome: SeoPollOutcome,
    },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid or expired token")]
    Auth,
    #[error("failed to open stream: {0}")]
    Connect(String),
    #[error("analysis endpoint returned http status {0}")]
    HttpStatus(u16),
    #[error("stream interrupted: {0}")]
    Stream(String),
    #[error("stream ended without a terminal event")]
    EndedWithoutTerminal,
}
