use crate::{HandoffChoice, JobState, SeoPhase, SeoSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub final_url: String,
    pub page_count: usize,
    pub path_count: usize,
    pub ai_enriched: bool,
    pub seo: Option<SeoSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub url: String,
    pub page_count: usize,
    pub seo_attached: bool,
    pub finished_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionViewModel {
    pub job: JobState,
    pub url_input: String,
    pub validation_error: Option<String>,
    pub session_id: Option<String>,
    pub percent: u8,
    pub status_message: String,
    pub prompt_open: bool,
    pub prompt_message: Option<String>,
    pub handoff: Option<HandoffChoice>,
    pub seo: SeoPhase,
    pub result: Option<ResultView>,
    pub history: Vec<HistoryRowView>,
    pub dirty: bool,
}
