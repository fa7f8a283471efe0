#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlChanged(String),
    /// User submitted the current URL input; the frontend allocates the
    /// session id before the transport opens.
    AnalyzeSubmitted { session_id: crate::SessionId },
    /// User clicked Cancel while an analysis is running.
    CancelClicked,
    /// User chose to keep watching at the async handoff prompt.
    PromptKeepWatching,
    /// User chose deferred (email) delivery at the async handoff prompt.
    PromptDeferred,
    /// A dispatched event from the analysis stream.
    Stream {
        session_id: crate::SessionId,
        event: crate::StreamEvent,
    },
    /// Terminal outcome of the secondary SEO poll loop.
    SeoPoll {
        session_id: crate::SessionId,
        outcome: crate::SeoOutcome,
    },
    /// Restore previously completed analyses from persisted state.
    RestoreHistory(Vec<crate::CompletedAnalysisSnapshot>),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
