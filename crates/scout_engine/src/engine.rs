use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use scout_logging::{scout_error, scout_warn};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::auth::{AllowAllValidator, TokenValidator};
use crate::cancel::{CancelClient, CancelSettings};
use crate::ip::lookup_public_ip;
use crate::poll::{poll_seo_until_terminal, PollSettings};
use crate::transport::{
    AnalysisRequest, ChannelEventSink, Credentials, EventSink, SseStreamTransport, StreamSettings,
    StreamTransport,
};
use crate::types::{EngineEvent, SessionEvent};

pub struct EngineConfig {
    pub stream: StreamSettings,
    pub cancel: CancelSettings,
    pub seo: PollSettings,
    /// Endpoint returning the caller's public IP; `None` disables the
    /// enrichment entirely.
    pub ip_endpoint: Option<String>,
    pub credentials: Credentials,
    pub validator: Arc<dyn TokenValidator>,
}

impl EngineConfig {
    /// Anonymous configuration with all endpoints derived from one server
    /// base URL.
    pub fn for_server(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            stream: StreamSettings {
                endpoint: format!("{base}/analyze-stream"),
                connect_timeout: Duration::from_secs(10),
            },
            cancel: CancelSettings {
                endpoint: format!("{base}/cancel-analysis"),
                request_timeout: Duration::from_secs(10),
            },
            seo: PollSettings::with_endpoint(format!("{base}/seo-status")),
            ip_endpoint: Some("https://api.ipify.org?format=json".to_string()),
            credentials: Credentials::Anonymous,
            validator: Arc::new(AllowAllValidator),
        }
    }

    pub fn with_bearer(mut self, token: String) -> Self {
        self.credentials = Credentials::Bearer(token);
        self
    }
}

enum EngineCommand {
    OpenStream { request: AnalysisRequest },
    CancelRemote { session_id: String },
    CloseStream { session_id: String },
    StartSeoPoll {
        session_id: String,
        seo_session_id: String,
    },
}

/// Handle to the engine worker thread. Commands go in over a channel;
/// events come back out via `try_recv`.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || worker_loop(config, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn open_stream(&self, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::OpenStream { request });
    }

    pub fn cancel_remote(&self, session_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::CancelRemote {
            session_id: session_id.into(),
        });
    }

    pub fn close_stream(&self, session_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::CloseStream {
            session_id: session_id.into(),
        });
    }

    pub fn start_seo_poll(
        &self,
        session_id: impl Into<String>,
        seo_session_id: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::StartSeoPoll {
            session_id: session_id.into(),
            seo_session_id: seo_session_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

fn worker_loop(
    config: EngineConfig,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            scout_error!("engine runtime failed to start: {err}");
            return;
        }
    };
    let http_client = match reqwest::Client::builder().build() {
        Ok(client) => client,
        Err(err) => {
            scout_error!("engine http client failed to build: {err}");
            return;
        }
    };

    let transport = Arc::new(SseStreamTransport::new(
        config.stream.clone(),
        config.validator.clone(),
    ));
    let cancel_client = Arc::new(CancelClient::new(config.cancel.clone(), http_client.clone()));
    let ip_cache: Arc<OnceCell<Option<String>>> = Arc::new(OnceCell::new());
    let mut streams: HashMap<String, CancellationToken> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::OpenStream { mut request } => {
                let token = CancellationToken::new();
                // At most one active transport per session.
                if let Some(previous) = streams.insert(request.session_id.clone(), token.clone()) {
                    previous.cancel();
                }
                let transport = transport.clone();
                let credentials = config.credentials.clone();
                let event_tx = event_tx.clone();
                let ip_cache = ip_cache.clone();
                let ip_endpoint = config.ip_endpoint.clone();
                let ip_client = http_client.clone();
                runtime.spawn(async move {
                    if request.user_ip.is_none() {
                        if let Some(endpoint) = ip_endpoint {
                            request.user_ip = ip_cache
                                .get_or_init(|| async {
                                    lookup_public_ip(&ip_client, &endpoint).await
                                })
                                .await
                                .clone();
                        }
                    }
                    let sink = ChannelEventSink::new(event_tx);
                    if let Err(err) = transport.run(&request, &credentials, &sink, token).await {
                        scout_warn!(
                            "stream for session {} ended abnormally: {err}",
                            request.session_id
                        );
                        sink.deliver(
                            &request.session_id,
                            SessionEvent::Error {
                                reason: err.to_string(),
                            },
                        );
                    }
                });
            }
            EngineCommand::CancelRemote { session_id } => {
                let cancel_client = cancel_client.clone();
                runtime.spawn(async move {
                    if let Err(err) = cancel_client.cancel(&session_id).await {
                        // Local cancellation already happened; the remote
                        // request is best-effort only.
                        scout_warn!("remote cancel for session {session_id} failed: {err}");
                    }
                });
            }
            EngineCommand::CloseStream { session_id } => {
                if let Some(token) = streams.remove(&session_id) {
                    token.cancel();
                }
            }
            EngineCommand::StartSeoPoll {
                session_id,
                seo_session_id,
            } => {
                let client = http_client.clone();
                let settings = config.seo.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let outcome =
                        poll_seo_until_terminal(&client, &settings, &seo_session_id).await;
                    let _ = event_tx.send(EngineEvent::SeoPoll {
                        session_id,
                        outcome,
                    });
                });
            }
        }
    }
}
