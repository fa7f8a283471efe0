use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use scout_core::{update, AppState, HandoffChoice, JobState, Msg, SeoPhase, SessionViewModel};
use scout_engine::{new_session_id, EngineConfig, EngineHandle};

use crate::args::CliOptions;
use crate::effects::EffectRunner;
use crate::persistence;
use crate::render;

pub fn run(options: CliOptions) -> ExitCode {
    let mut config = EngineConfig::for_server(&options.server);
    if let Some(token) = options.token.clone() {
        config = config.with_bearer(token);
    }
    let engine = EngineHandle::new(config);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, msg_tx.clone());

    let mut state = AppState::with_options(options.bots.clone(), options.ai_enrichment);
    let restored = persistence::load_history(&options.state_dir);
    if !restored.is_empty() {
        state = dispatch(state, Msg::RestoreHistory(restored), &runner);
    }

    state = dispatch(state, Msg::UrlChanged(options.url.clone()), &runner);
    let session_id = new_session_id();
    state = dispatch(state, Msg::AnalyzeSubmitted { session_id }, &runner);

    if let Some(reason) = state.view().validation_error {
        eprintln!("error: {reason}");
        return ExitCode::from(2);
    }
    let _ = state.consume_dirty();
    render::print_banner(&state.view());

    spawn_stdin_reader(msg_tx);

    loop {
        match msg_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(msg) => state = dispatch(state, msg, &runner),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if state.consume_dirty() {
            render::render(&state.view());
        }

        let view = state.view();
        if view.handoff == Some(HandoffChoice::Deferred) {
            render::print_deferred_notice();
            return ExitCode::SUCCESS;
        }
        if view.job.is_terminal() && !seo_outcome_pending(&view) {
            break;
        }
    }

    let view = state.view();
    render::print_summary(&view);
    if view.job == JobState::Completed {
        persistence::save_history(&options.state_dir, &state.history_snapshot());
    }
    match view.job {
        JobState::Completed => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

/// Keep the terminal open while a started SEO poll has not reached its own
/// terminal outcome. The primary result stays valid and printable whether
/// or not the augmentation ever lands.
fn seo_outcome_pending(view: &SessionViewModel) -> bool {
    view.job == JobState::Completed && view.seo == SeoPhase::Polling
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let msg = match line.trim() {
                "c" | "cancel" => Msg::CancelClicked,
                "w" | "wait" => Msg::PromptKeepWatching,
                "l" | "leave" => Msg::PromptDeferred,
                _ => Msg::NoOp,
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}
