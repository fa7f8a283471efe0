//! Scout core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{AnalysisRequest, Effect};
pub use msg::Msg;
pub use state::{
    normalize_submitted_url, AnalysisSummary, AppState, CompletedAnalysisSnapshot, HandoffChoice,
    JobState, PromptGate, SeoOutcome, SeoPhase, SeoSummary, SessionId, StreamEvent,
};
pub use update::update;
pub use view_model::{HistoryRowView, ResultView, SessionViewModel};
