use crate::client::AnalysisApi;
use crate::display::{DisplayState, StatusSink};
use crate::model::{AnalysisEnvelope, NameAnalysisRequest};
use crate::utils::join_url;

use futures::future::{BoxFuture, FutureExt};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// A finished analysis whose report is ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Path relative to the service base URL.
    pub download_url: String,
    /// Base URL and `download_url` concatenated.
    pub download_link: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Completed(Report),
    /// The service answered but reported a failure.
    ApiError { message: String },
    /// Network, HTTP status or decoding failure.
    ConnectionError { reason: String },
    /// A newer invocation started before this one resolved; nothing was displayed.
    Superseded,
}

impl AnalysisOutcome {
    fn display_state(&self, base_url: &str) -> Option<DisplayState> {
        match self {
            AnalysisOutcome::Completed(report) => Some(DisplayState::Completed {
                download_link: report.download_link.clone(),
            }),
            AnalysisOutcome::ApiError { message } => Some(DisplayState::ApiError {
                message: message.clone(),
            }),
            AnalysisOutcome::ConnectionError { reason } => Some(DisplayState::ConnectionError {
                reason: reason.clone(),
                base_url: base_url.to_string(),
            }),
            AnalysisOutcome::Superseded => None,
        }
    }
}

/// Sends names to the analysis service and renders the result into a status sink.
///
/// Invocations may overlap. Each one takes a ticket; only the most recently
/// issued invocation is allowed to write its result, so a slow stale response
/// never overwrites a newer one. The ticket check and the sink write share one
/// lock, so the sink must not call `analyze` from `show`.
pub struct NameAnalysisHandler {
    api: Arc<dyn AnalysisApi>,
    sink: Arc<dyn StatusSink>,
    generation: Arc<Mutex<u64>>,
}

impl NameAnalysisHandler {
    pub fn new(api: Arc<dyn AnalysisApi>, sink: Arc<dyn StatusSink>) -> Self {
        Self {
            api,
            sink,
            generation: Arc::new(Mutex::new(0)),
        }
    }

    /// Shows the processing state right away, then returns the request future.
    ///
    /// The future never fails: every error ends up as a displayed outcome.
    pub fn analyze(&self, name: impl Into<String>) -> BoxFuture<'static, AnalysisOutcome> {
        let ticket = {
            let mut generation = lock(&self.generation);
            *generation += 1;
            self.sink.show(&DisplayState::Processing);
            *generation
        };

        let request = NameAnalysisRequest::new(name);
        let api = self.api.clone();
        let sink = self.sink.clone();
        let generation = self.generation.clone();

        async move {
            info!("🔍 Analyzing name {:?} (ticket {})", request.name, ticket);
            let base_url = api.base_url().to_string();

            let outcome = match api.analyze_name(&request).await {
                Ok(AnalysisEnvelope::Success {
                    download_url,
                    filename,
                    ..
                }) => AnalysisOutcome::Completed(Report {
                    download_link: join_url(&base_url, &download_url),
                    download_url,
                    filename,
                }),
                Ok(AnalysisEnvelope::Failure { message }) => {
                    warn!("❌ Service rejected the name: {}", message);
                    AnalysisOutcome::ApiError { message }
                }
                Err(e) => {
                    warn!("❌ Name analysis request failed: {}", e);
                    AnalysisOutcome::ConnectionError {
                        reason: e.to_string(),
                    }
                }
            };

            let current = lock(&generation);
            if *current != ticket {
                info!("⏭️ Ticket {} superseded by {}", ticket, *current);
                return AnalysisOutcome::Superseded;
            }
            if let Some(state) = outcome.display_state(&base_url) {
                sink.show(&state);
            }
            outcome
        }
        .boxed()
    }
}

fn lock(generation: &Mutex<u64>) -> std::sync::MutexGuard<'_, u64> {
    generation
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
