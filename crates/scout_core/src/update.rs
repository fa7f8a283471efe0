use crate::{
    normalize_submitted_url, AnalysisRequest, AppState, Effect, HandoffChoice, JobState, Msg,
    SeoOutcome, SessionId, StreamEvent,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::AnalyzeSubmitted { session_id } => {
            // One live session at a time; a running job must be cancelled
            // or reach a terminal state before a new submit is accepted.
            if state.job() == JobState::Running {
                return (state, Vec::new());
            }
            match normalize_submitted_url(state.url_input()) {
                Err(reason) => {
                    state.set_validation_error(reason);
                    Vec::new()
                }
                Ok(url) => {
                    let request = AnalysisRequest {
                        session_id: session_id.clone(),
                        url: url.clone(),
                        bots: state.bots().to_vec(),
                        ai_enrichment: state.ai_enrichment(),
                    };
                    state.start_session(session_id, url);
                    vec![Effect::OpenStream { request }]
                }
            }
        }
        Msg::CancelClicked => {
            if state.job() != JobState::Running {
                return (state, Vec::new());
            }
            let Some(session_id) = state.session_id().map(str::to_string) else {
                return (state, Vec::new());
            };
            // Local cancellation wins unconditionally; the remote request
            // is best-effort and its failure never reverts this state.
            state.apply_cancelled("analysis cancelled");
            vec![
                Effect::CancelRemote {
                    session_id: session_id.clone(),
                },
                Effect::CloseStream { session_id },
            ]
        }
        Msg::PromptKeepWatching => {
            state.close_prompt(HandoffChoice::KeepWatching);
            Vec::new()
        }
        Msg::PromptDeferred => {
            state.close_prompt(HandoffChoice::Deferred);
            Vec::new()
        }
        Msg::Stream { session_id, event } => {
            if !state.is_current_session(&session_id) {
                return (state, Vec::new());
            }
            apply_stream_event(&mut state, session_id, event)
        }
        Msg::SeoPoll {
            session_id,
            outcome,
        } => {
            if !state.is_current_session(&session_id) {
                return (state, Vec::new());
            }
            match outcome {
                SeoOutcome::Completed(seo) => state.attach_seo(seo),
                SeoOutcome::NotFound | SeoOutcome::TimedOut => state.abandon_seo(),
            }
            Vec::new()
        }
        Msg::RestoreHistory(history) => {
            state.restore_history(history);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_stream_event(
    state: &mut AppState,
    session_id: SessionId,
    event: StreamEvent,
) -> Vec<Effect> {
    match event {
        StreamEvent::Progress { percent, message } => {
            if state.job() == JobState::Running {
                state.apply_progress(percent, message);
            }
            Vec::new()
        }
        StreamEvent::AsyncPrompt { message } => {
            if state.job() == JobState::Running {
                state.open_prompt(message);
            }
            Vec::new()
        }
        // Secondary-job events stay valid after the primary job is
        // terminal; the poller has its own lifetime.
        StreamEvent::SeoSessionId { seo_session_id } => {
            if state.mark_seo_polling() {
                vec![Effect::StartSeoPoll {
                    session_id,
                    seo_session_id,
                }]
            } else {
                Vec::new()
            }
        }
        StreamEvent::Result(summary) => {
            if state.job().is_terminal() {
                return Vec::new();
            }
            state.apply_result(summary);
            vec![Effect::CloseStream { session_id }]
        }
        StreamEvent::Error { reason } => {
            if state.job().is_terminal() {
                return Vec::new();
            }
            state.apply_error(reason);
            vec![Effect::CloseStream { session_id }]
        }
        StreamEvent::Cancelled => {
            if state.job().is_terminal() {
                return Vec::new();
            }
            state.apply_cancelled("analysis cancelled by server");
            vec![Effect::CloseStream { session_id }]
        }
        StreamEvent::Ended => vec![Effect::CloseStream { session_id }],
    }
}
