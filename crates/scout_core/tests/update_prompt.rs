use scout_core::{update, AppState, Effect, HandoffChoice, JobState, Msg, StreamEvent};

fn submit(state: AppState, input: &str, session_id: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlChanged(input.to_string()));
    update(
        state,
        Msg::AnalyzeSubmitted {
            session_id: session_id.to_string(),
        },
    )
}

fn prompt(state: AppState, session_id: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::Stream {
            session_id: session_id.to_string(),
            event: StreamEvent::AsyncPrompt {
                message: "this may take a while".to_string(),
            },
        },
    )
}

#[test]
fn async_prompt_opens_the_gate_once() {
    let (state, _) = submit(AppState::new(), "https://example.com", "s-5");
    let (state, effects) = prompt(state, "s-5");

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.prompt_open);
    assert_eq!(view.prompt_message.as_deref(), Some("this may take a while"));
}

#[test]
fn keep_watching_closes_the_gate_and_keeps_running() {
    let (state, _) = submit(AppState::new(), "https://example.com", "s-5");
    let (state, _) = prompt(state, "s-5");
    let (state, effects) = update(state, Msg::PromptKeepWatching);

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.prompt_open);
    assert_eq!(view.handoff, Some(HandoffChoice::KeepWatching));
    assert_eq!(view.job, JobState::Running);
}

#[test]
fn deferred_choice_records_email_handoff_without_cancelling() {
    let (state, _) = submit(AppState::new(), "https://example.com", "s-5");
    let (state, _) = prompt(state, "s-5");
    let (state, effects) = update(state, Msg::PromptDeferred);

    // No CancelRemote and no CloseStream: the job keeps running
    // server-side and the decision is purely client-side.
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.handoff, Some(HandoffChoice::Deferred));
    assert_eq!(view.job, JobState::Running);
}

#[test]
fn gate_does_not_reopen_after_being_closed() {
    let (state, _) = submit(AppState::new(), "https://example.com", "s-5");
    let (state, _) = prompt(state, "s-5");
    let (state, _) = update(state, Msg::PromptKeepWatching);

    let (state, effects) = prompt(state, "s-5");
    assert!(effects.is_empty());
    assert!(!state.view().prompt_open);
}

#[test]
fn prompt_choice_without_open_gate_is_ignored() {
    let (state, _) = submit(AppState::new(), "https://example.com", "s-5");
    let (next, effects) = update(state.clone(), Msg::PromptDeferred);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
