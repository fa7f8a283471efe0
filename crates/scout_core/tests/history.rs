use scout_core::{
    update, AnalysisSummary, AppState, CompletedAnalysisSnapshot, Effect, Msg, StreamEvent,
};

fn submit(state: AppState, input: &str, session_id: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlChanged(input.to_string()));
    update(
        state,
        Msg::AnalyzeSubmitted {
            session_id: session_id.to_string(),
        },
    )
}

#[test]
fn completed_analyses_can_be_snapshotted_and_restored() {
    let (state, _) = submit(AppState::new(), "https://example.com", "s-7");
    let (state, _) = update(
        state,
        Msg::Stream {
            session_id: "s-7".to_string(),
            event: StreamEvent::Result(AnalysisSummary {
                final_url: "https://example.com/".to_string(),
                page_count: 9,
                extracted_paths: vec!["/".to_string()],
                ai_enriched: false,
                seo: None,
            }),
        },
    );

    let snapshot = state.history_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].url, "https://example.com/");
    assert_eq!(snapshot[0].page_count, 9);
    assert!(!snapshot[0].seo_attached);

    let (restored, _) = update(AppState::new(), Msg::RestoreHistory(snapshot));
    let view = restored.view();
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].url, "https://example.com/");
}

#[test]
fn restored_history_does_not_disturb_a_live_session() {
    let (state, _) = submit(AppState::new(), "https://example.com", "s-7");
    let (state, _) = update(
        state,
        Msg::RestoreHistory(vec![CompletedAnalysisSnapshot {
            url: "https://old.example.com/".to_string(),
            page_count: 2,
            seo_attached: true,
            finished_at: Some("2026-01-01T00:00:00Z".to_string()),
        }]),
    );

    let view = state.view();
    assert_eq!(view.job, scout_core::JobState::Running);
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].finished_at.as_deref(), Some("2026-01-01T00:00:00Z"));
}
