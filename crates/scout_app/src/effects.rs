use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use scout_core::{AnalysisSummary, Effect, Msg, SeoOutcome, SeoSummary, StreamEvent};
use scout_engine::{
    AnalysisRequest, AnalysisResultPayload, EngineEvent, EngineHandle, SeoPollOutcome,
    SeoReportPayload, SessionEvent,
};
use scout_logging::scout_info;

/// Bridges core effects to the engine and pumps engine events back as
/// messages for the update loop.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_pump(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenStream { request } => {
                    scout_info!(
                        "OpenStream session={} url={}",
                        request.session_id,
                        request.url
                    );
                    self.engine.open_stream(AnalysisRequest {
                        session_id: request.session_id,
                        url: request.url,
                        bots: request.bots,
                        ai_enrichment: request.ai_enrichment,
                        // The engine enriches with the cached public IP.
                        user_ip: None,
                    });
                }
                Effect::CancelRemote { session_id } => {
                    self.engine.cancel_remote(session_id);
                }
                Effect::CloseStream { session_id } => {
                    self.engine.close_stream(session_id);
                }
                Effect::StartSeoPoll {
                    session_id,
                    seo_session_id,
                } => {
                    scout_info!("StartSeoPoll session={session_id} seo={seo_session_id}");
                    self.engine.start_seo_poll(session_id, seo_session_id);
                }
            }
        }
    }

    fn spawn_event_pump(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_engine_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_engine_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Stream { session_id, event } => Msg::Stream {
            session_id,
            event: map_stream_event(event),
        },
        EngineEvent::SeoPoll {
            session_id,
            outcome,
        } => Msg::SeoPoll {
            session_id,
            outcome: match outcome {
                SeoPollOutcome::Completed(report) => SeoOutcome::Completed(map_seo_report(report)),
                SeoPollOutcome::NotFound => SeoOutcome::NotFound,
                SeoPollOutcome::TimedOut => SeoOutcome::TimedOut,
            },
        },
    }
}

fn map_stream_event(event: SessionEvent) -> StreamEvent {
    match event {
        SessionEvent::Progress(payload) => StreamEvent::Progress {
            percent: payload.percent,
            message: payload.message,
        },
        SessionEvent::AsyncPrompt(payload) => StreamEvent::AsyncPrompt {
            message: payload.message,
        },
        SessionEvent::SeoSession(payload) => StreamEvent::SeoSessionId {
            seo_session_id: payload.seo_session_id,
        },
        SessionEvent::Result(payload) => StreamEvent::Result(map_result(payload)),
        SessionEvent::Error { reason } => StreamEvent::Error { reason },
        SessionEvent::Cancelled => StreamEvent::Cancelled,
        SessionEvent::Ended => StreamEvent::Ended,
    }
}

fn map_result(payload: AnalysisResultPayload) -> AnalysisSummary {
    let page_count = payload
        .pages_crawled
        .map(|count| count as usize)
        .unwrap_or(payload.extracted_paths.len());
    AnalysisSummary {
        final_url: payload.url.unwrap_or_default(),
        page_count,
        extracted_paths: payload.extracted_paths,
        ai_enriched: payload.ai_content.is_some(),
        seo: None,
    }
}

fn map_seo_report(report: SeoReportPayload) -> SeoSummary {
    let issue_count = report
        .issues
        .iter()
        .filter(|issue| issue.severity.eq_ignore_ascii_case("error"))
        .count();
    SeoSummary {
        score: report.score,
        issue_count,
        warning_count: report.issues.len() - issue_count,
    }
}
