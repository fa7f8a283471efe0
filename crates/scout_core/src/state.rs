use url::Url;

use crate::view_model::{HistoryRowView, ResultView, SessionViewModel};

pub type SessionId = String;

/// Primary job lifecycle. Terminal states are absorbing: once entered,
/// further stream events for the session are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Failed | JobState::Cancelled
        )
    }
}

/// Async handoff gate. Opens at most once per session and never reopens
/// after it has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptGate {
    #[default]
    Unseen,
    Open,
    Closed,
}

/// User decision taken at the handoff gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffChoice {
    /// Keep the live stream on screen.
    KeepWatching,
    /// Stop watching; completion will arrive by email.
    Deferred,
}

/// Secondary SEO job progress as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeoPhase {
    #[default]
    Idle,
    Polling,
    Attached,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoSummary {
    pub score: u32,
    pub issue_count: usize,
    pub warning_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub final_url: String,
    pub page_count: usize,
    pub extracted_paths: Vec<String>,
    pub ai_enriched: bool,
    pub seo: Option<SeoSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedAnalysisSnapshot {
    pub url: String,
    pub page_count: usize,
    pub seo_attached: bool,
    /// RFC 3339; stamped by the frontend when persisting.
    pub finished_at: Option<String>,
}

/// Typed stream events after dispatch. Each carries no session identity of
/// its own; `Msg::Stream` tags the originating session so stale deliveries
/// can be dropped before they reach the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Progress { percent: u8, message: String },
    AsyncPrompt { message: String },
    SeoSessionId { seo_session_id: String },
    Result(AnalysisSummary),
    Error { reason: String },
    Cancelled,
    Ended,
}

/// Terminal outcome of one secondary poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeoOutcome {
    Completed(SeoSummary),
    NotFound,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveSession {
    session_id: SessionId,
    url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    validation_error: Option<String>,
    bots: Vec<String>,
    ai_enrichment: bool,
    session: Option<ActiveSession>,
    job: JobState,
    percent: u8,
    status_message: String,
    prompt: PromptGate,
    prompt_message: Option<String>,
    handoff: Option<HandoffChoice>,
    seo: SeoPhase,
    result: Option<AnalysisSummary>,
    // SEO report that completed before the primary result existed.
    pending_seo: Option<SeoSummary>,
    history: Vec<CompletedAnalysisSnapshot>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State preconfigured with the analysis options forwarded on submit.
    pub fn with_options(bots: Vec<String>, ai_enrichment: bool) -> Self {
        Self {
            bots,
            ai_enrichment,
            ..Self::default()
        }
    }

    pub fn view(&self) -> SessionViewModel {
        SessionViewModel {
            job: self.job,
            url_input: self.url_input.clone(),
            validation_error: self.validation_error.clone(),
            session_id: self
                .session
                .as_ref()
                .map(|session| session.session_id.clone()),
            percent: self.percent,
            status_message: self.status_message.clone(),
            prompt_open: self.prompt == PromptGate::Open,
            prompt_message: self.prompt_message.clone(),
            handoff: self.handoff,
            seo: self.seo,
            result: self.result.as_ref().map(|summary| ResultView {
                final_url: summary.final_url.clone(),
                page_count: summary.page_count,
                path_count: summary.extracted_paths.len(),
                ai_enriched: summary.ai_enriched,
                seo: summary.seo.clone(),
            }),
            history: self
                .history
                .iter()
                .map(|entry| HistoryRowView {
                    url: entry.url.clone(),
                    page_count: entry.page_count,
                    seo_attached: entry.seo_attached,
                    finished_at: entry.finished_at.clone(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn job(&self) -> JobState {
        self.job
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn bots(&self) -> &[String] {
        &self.bots
    }

    pub fn ai_enrichment(&self) -> bool {
        self.ai_enrichment
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.session_id.as_str())
    }

    /// Snapshot of completed analyses for persistence.
    pub fn history_snapshot(&self) -> Vec<CompletedAnalysisSnapshot> {
        self.history.clone()
    }

    pub(crate) fn is_current_session(&self, session_id: &str) -> bool {
        self.session_id() == Some(session_id)
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.validation_error = None;
            self.dirty = true;
        }
    }

    pub(crate) fn set_validation_error(&mut self, reason: String) {
        self.validation_error = Some(reason);
        self.dirty = true;
    }

    /// Reset per-session fields and enter `Running`. The previous session's
    /// identifier is discarded here, which makes every event still in flight
    /// for it fail the identity check.
    pub(crate) fn start_session(&mut self, session_id: SessionId, url: String) {
        self.session = Some(ActiveSession { session_id, url });
        self.job = JobState::Running;
        self.percent = 0;
        self.status_message = "starting analysis".to_string();
        self.validation_error = None;
        self.prompt = PromptGate::Unseen;
        self.prompt_message = None;
        self.handoff = None;
        self.seo = SeoPhase::Idle;
        self.result = None;
        self.pending_seo = None;
        self.dirty = true;
    }

    pub(crate) fn apply_progress(&mut self, percent: u8, message: String) {
        // Last write wins; no accumulation and no monotonicity assumption.
        self.percent = percent.min(100);
        self.status_message = message;
        self.dirty = true;
    }

    pub(crate) fn open_prompt(&mut self, message: String) {
        if self.prompt != PromptGate::Unseen {
            return;
        }
        self.prompt = PromptGate::Open;
        self.prompt_message = Some(message);
        self.dirty = true;
    }

    pub(crate) fn close_prompt(&mut self, choice: HandoffChoice) {
        if self.prompt != PromptGate::Open {
            return;
        }
        self.prompt = PromptGate::Closed;
        self.handoff = Some(choice);
        if choice == HandoffChoice::Deferred {
            self.status_message =
                "analysis continues on the server; you will be notified by email".to_string();
        }
        self.dirty = true;
    }

    /// Marks the secondary poller as started. Returns false when a poller
    /// already ran for this session, so duplicate `seoSessionId` frames do
    /// not spawn a second loop.
    pub(crate) fn mark_seo_polling(&mut self) -> bool {
        if self.seo != SeoPhase::Idle {
            return false;
        }
        self.seo = SeoPhase::Polling;
        self.dirty = true;
        true
    }

    pub(crate) fn apply_result(&mut self, mut summary: AnalysisSummary) {
        if let Some(seo) = self.pending_seo.take() {
            if summary.seo.is_none() {
                summary.seo = Some(seo);
            }
        }
        let seo_attached = summary.seo.is_some();
        let page_count = summary.page_count;
        self.job = JobState::Completed;
        self.drop_open_prompt();
        self.percent = 100;
        self.status_message = "analysis complete".to_string();
        self.result = Some(summary);
        if let Some(session) = &self.session {
            let snapshot = CompletedAnalysisSnapshot {
                url: session.url.clone(),
                page_count,
                seo_attached,
                finished_at: None,
            };
            self.history.push(snapshot);
        }
        self.dirty = true;
    }

    pub(crate) fn apply_error(&mut self, reason: String) {
        self.job = JobState::Failed;
        self.drop_open_prompt();
        self.status_message = if reason.is_empty() {
            "analysis failed or connection lost".to_string()
        } else {
            reason
        };
        self.dirty = true;
    }

    pub(crate) fn apply_cancelled(&mut self, message: &str) {
        self.job = JobState::Cancelled;
        self.drop_open_prompt();
        self.status_message = message.to_string();
        self.dirty = true;
    }

    // A still-open gate is moot once the job is terminal; closing it keeps
    // the at-most-once guarantee without recording a choice.
    fn drop_open_prompt(&mut self) {
        if self.prompt == PromptGate::Open {
            self.prompt = PromptGate::Closed;
        }
    }

    /// Additive merge of the SEO report into the primary result. Never
    /// re-fires completion side effects. If the result does not exist yet
    /// the report is parked until it does.
    pub(crate) fn attach_seo(&mut self, seo: SeoSummary) {
        self.seo = SeoPhase::Attached;
        match self.result.as_mut() {
            Some(result) => {
                if result.seo.is_none() {
                    result.seo = Some(seo);
                    if let Some(session) = &self.session {
                        if let Some(entry) = self
                            .history
                            .iter_mut()
                            .rev()
                            .find(|entry| entry.url == session.url)
                        {
                            entry.seo_attached = true;
                        }
                    }
                    self.dirty = true;
                }
            }
            None => {
                self.pending_seo = Some(seo);
                self.dirty = true;
            }
        }
    }

    pub(crate) fn abandon_seo(&mut self) {
        if self.seo == SeoPhase::Polling {
            self.seo = SeoPhase::Abandoned;
            self.dirty = true;
        }
    }

    pub(crate) fn restore_history(&mut self, history: Vec<CompletedAnalysisSnapshot>) {
        self.history = history;
        self.dirty = true;
    }
}

/// Validate and normalize a submitted URL. Scheme-less input gets an
/// implicit `https://`; anything that is not http(s) with a host is
/// rejected before a transport is ever opened.
pub fn normalize_submitted_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("enter a website address".to_string());
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let parsed =
        Url::parse(&candidate).map_err(|_| format!("not a valid website address: {trimmed}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme: {}", parsed.scheme()));
    }
    if parsed.host_str().is_none() {
        return Err(format!("not a valid website address: {trimmed}"));
    }
    Ok(parsed.to_string())
}
