pub mod autosave;
pub mod buffer;
pub mod controller;
pub mod domain;
pub mod notifications;
pub mod ports;

pub use autosave::{DraftAutosaver, DRAFT_KEY};
pub use buffer::{find_sample, samples, InputBuffer};
pub use controller::{
    AnalysisController, AnalysisError, ControllerState, SubmitOutcome, ValidationError,
};
pub use domain::{
    AnalysisRequest, AnalysisResult, ConfidenceBar, CounterLevel, Notification,
    NotificationKind, NotificationPhase, ResultPresentation, Sample, Sentiment, SentimentIcon,
    Tone, MAX_LENGTH,
};
pub use notifications::{NotificationCenter, NotificationEvent};
pub use ports::{
    AnalysisView, KeyValueStore, NotificationSink, PortError, PortResult, PredictionService,
};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
