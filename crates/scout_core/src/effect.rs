/// Parameters of one analysis run, assembled by the state machine at
/// submit time. The engine adds transport-only fields (client IP).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub session_id: crate::SessionId,
    pub url: String,
    pub bots: Vec<String>,
    pub ai_enrichment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the streaming transport for a new session.
    OpenStream { request: AnalysisRequest },
    /// Best-effort remote cancellation. Local state is already `Cancelled`
    /// when this is emitted; a failed request changes nothing.
    CancelRemote { session_id: crate::SessionId },
    /// Tear down the transport. Idempotent at the engine level.
    CloseStream { session_id: crate::SessionId },
    /// Start the secondary SEO poll loop.
    StartSeoPoll {
        session_id: crate::SessionId,
        seo_session_id: String,
    },
}
