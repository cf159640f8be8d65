use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use tokio_util::sync::CancellationToken;
use vagas_logging::{vagas_info, vagas_warn};

use crate::decode::{decode_text, parse_jobs};
use crate::fetch::{FetchSettings, Fetcher, FileFetcher, ReqwestFetcher};
use crate::{DataSource, EngineEvent, FailureKind, FetchError, LoadedJobs};

enum EngineCommand {
    Load(DataSource),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start the loader runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

struct Fetchers {
    http: ReqwestFetcher,
    file: FileFetcher,
}

impl Fetchers {
    fn for_source(&self, source: &DataSource) -> &dyn Fetcher {
        match source {
            DataSource::Http(_) => &self.http,
            DataSource::File(_) => &self.file,
        }
    }
}

/// Background loader. At most one load runs at a time; results arrive as
/// [`EngineEvent`]s through [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    loading: Arc<AtomicBool>,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetchers = Arc::new(Fetchers {
            file: FileFetcher::new(&settings),
            http: ReqwestFetcher::new(settings),
        });
        let loading = Arc::new(AtomicBool::new(false));
        let cancel = CancellationToken::new();

        let worker_loading = loading.clone();
        let worker_cancel = cancel.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let fetchers = fetchers.clone();
                let event_tx = event_tx.clone();
                let loading = worker_loading.clone();
                let cancel = worker_cancel.clone();
                runtime.spawn(async move {
                    let event = handle_command(&fetchers, command, &cancel).await;
                    // Cleared before the event is visible so a follow-up load is accepted.
                    loading.store(false, Ordering::Release);
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            loading,
            cancel,
        })
    }

    /// Starts a load. Returns false, and does nothing, while another load is in flight.
    pub fn load(&self, source: DataSource) -> bool {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            vagas_info!("load of {} ignored: another load is in flight", source);
            return false;
        }
        if self.cmd_tx.send(EngineCommand::Load(source)).is_err() {
            self.loading.store(false, Ordering::Release);
            return false;
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Cancels the in-flight load, if any. Later loads are cancelled immediately.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

async fn handle_command(
    fetchers: &Fetchers,
    command: EngineCommand,
    cancel: &CancellationToken,
) -> EngineEvent {
    match command {
        EngineCommand::Load(source) => {
            vagas_info!("loading jobs from {}", source);
            let fetcher = fetchers.for_source(&source);
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    Err(FetchError::new(FailureKind::Cancelled, "load cancelled"))
                }
                result = load_jobs(fetcher, &source) => result,
            };
            match &result {
                Ok(loaded) => vagas_info!(
                    "loaded {} jobs from {} ({} bytes, {} skipped)",
                    loaded.jobs.len(),
                    source,
                    loaded.metadata.byte_len,
                    loaded.skipped
                ),
                Err(err) => vagas_warn!("loading {} failed: {}", source, err),
            }
            EngineEvent::LoadCompleted(result)
        }
    }
}

/// Fetches, decodes and parses one job list.
pub async fn load_jobs(fetcher: &dyn Fetcher, source: &DataSource) -> Result<LoadedJobs, FetchError> {
    let output = fetcher.fetch(source).await?;
    let text = decode_text(&output.bytes, output.metadata.content_type.as_deref())
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    let parsed =
        parse_jobs(&text).map_err(|err| FetchError::new(FailureKind::Parse, err.to_string()))?;
    Ok(LoadedJobs {
        jobs: parsed.jobs,
        skipped: parsed.skipped,
        metadata: output.metadata,
    })
}
