//! Process-wide prediction metrics observer.
//!
//! Nothing is recorded unless a recorder is installed with
//! [`set_predict_metrics`]; the request path then pays one read-lock and one
//! `Instant::now()` per prediction.

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// How a single prediction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictOutcome {
    /// A known disease was reported.
    Accepted,
    /// Scores were computed but the unknown detector declined.
    Rejected,
    /// No vocabulary term matched; scoring was skipped.
    NoSignal,
    /// The request produced an error response.
    Failed,
}

impl PredictOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictOutcome::Accepted => "accepted",
            PredictOutcome::Rejected => "rejected",
            PredictOutcome::NoSignal => "no_signal",
            PredictOutcome::Failed => "failed",
        }
    }
}

/// Metrics observer for the prediction pipeline.
pub trait PredictMetrics: Send + Sync {
    fn record_prediction(&self, latency: Duration, outcome: PredictOutcome);
}

/// Install or clear the global prediction metrics recorder.
pub fn set_predict_metrics(recorder: Option<Arc<dyn PredictMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PredictMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PredictMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PredictMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn PredictMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn finish(self, outcome: PredictOutcome) {
        self.recorder
            .record_prediction(self.start.elapsed(), outcome);
    }
}
