//! crates/sentiment_core/src/controller.rs
//!
//! The analysis state machine. It validates the draft, keeps a single request in
//! flight, calls the prediction service and turns every outcome into exactly one
//! notification plus, on success, a render payload for the view.

use crate::buffer::{find_sample, InputBuffer};
use crate::domain::{AnalysisRequest, AnalysisResult, NotificationKind, MAX_LENGTH};
use crate::lock;
use crate::ports::{AnalysisView, NotificationSink, PortError, PredictionService};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

pub const SUCCESS_MESSAGE: &str = "Analysis completed successfully!";
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to analyze text. Please try again.";
pub const CLEARED_MESSAGE: &str = "Text cleared successfully!";
pub const SAMPLE_LOADED_MESSAGE: &str = "Sample text loaded! Click Analyze to see the result.";

/// Upper bound on a single prediction call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

//=========================================================================================
// Errors & Outcomes
//=========================================================================================

/// A submission refused locally; nothing was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter some text to analyze.")]
    Empty,
    #[error("Text is too long. Please limit to 1000 characters.")]
    TooLong { length: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Unreachable service, timeout or an undecodable response.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The service answered with an application error.
    #[error("Service error (status {status})")]
    Service { status: u16, reason: Option<String> },
}

impl AnalysisError {
    /// The flat text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation(e) => e.to_string(),
            AnalysisError::Service {
                reason: Some(reason),
                ..
            } if !reason.trim().is_empty() => reason.clone(),
            AnalysisError::Service { .. } | AnalysisError::Transport(_) => {
                FALLBACK_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

impl From<PortError> for AnalysisError {
    fn from(e: PortError) -> Self {
        match e {
            PortError::Service { status, reason } => AnalysisError::Service { status, reason },
            PortError::Transport(msg)
            | PortError::MalformedResponse(msg)
            | PortError::Unexpected(msg) => AnalysisError::Transport(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    Idle,
    Submitting,
    Displaying(AnalysisResult),
    /// Holds the reason shown to the user.
    Failed(String),
}

/// What a single `submit` call ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected(ValidationError),
    /// Another request was in flight; this call did nothing.
    AlreadySubmitting,
    Displayed(AnalysisResult),
    Failed(AnalysisError),
}

/// Checks trimmed text against the submission limits.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    let length = text.chars().count();
    if length == 0 {
        Err(ValidationError::Empty)
    } else if length > MAX_LENGTH {
        Err(ValidationError::TooLong { length })
    } else {
        Ok(())
    }
}

//=========================================================================================
// The Controller
//=========================================================================================

pub struct AnalysisController {
    buffer: Mutex<InputBuffer>,
    state: Arc<Mutex<ControllerState>>,
    service: Arc<dyn PredictionService>,
    view: Arc<dyn AnalysisView>,
    notifications: Arc<dyn NotificationSink>,
    request_timeout: Option<Duration>,
}

impl AnalysisController {
    pub fn new(
        buffer: InputBuffer,
        service: Arc<dyn PredictionService>,
        view: Arc<dyn AnalysisView>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            buffer: Mutex::new(buffer),
            state: Arc::new(Mutex::new(ControllerState::Idle)),
            service,
            view,
            notifications,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// `None` lets a call run until the service answers.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn state(&self) -> ControllerState {
        lock(&self.state).clone()
    }

    /// Direct access to the draft. Keep the guard short-lived.
    pub fn buffer(&self) -> MutexGuard<'_, InputBuffer> {
        lock(&self.buffer)
    }

    /// Replaces the draft with what the user typed.
    pub fn edit(&self, text: impl Into<String>) {
        self.buffer().set_content(text);
    }

    /// Clears the draft and the result region.
    pub fn clear(&self) {
        self.buffer().clear();
        self.view.hide_result();
        {
            let mut state = lock(&self.state);
            if !matches!(*state, ControllerState::Submitting) {
                *state = ControllerState::Idle;
            }
        }
        self.notifications
            .notify(CLEARED_MESSAGE, NotificationKind::Success);
    }

    /// Loads a catalogue sample by name or position. Unknown keys are ignored.
    pub fn load_sample(&self, key: &str) -> bool {
        let Some(sample) = find_sample(key) else {
            debug!("Unknown sample requested: {:?}", key);
            return false;
        };
        self.buffer().load_sample(sample.text);
        self.notifications
            .notify(SAMPLE_LOADED_MESSAGE, NotificationKind::Success);
        true
    }

    /// Runs one analysis of the current draft.
    pub async fn submit(&self) -> SubmitOutcome {
        match self.begin_submission() {
            Ok((request, in_flight)) => self.complete(request, in_flight).await,
            Err(outcome) => outcome,
        }
    }

    /// Validates and snapshots the draft immediately, then finishes the request
    /// on a background task. Edits made after this call never reach the request.
    pub fn spawn_submit(self: &Arc<Self>) -> JoinHandle<SubmitOutcome> {
        match self.begin_submission() {
            Ok((request, in_flight)) => {
                let controller = Arc::clone(self);
                tokio::spawn(async move { controller.complete(request, in_flight).await })
            }
            Err(outcome) => tokio::spawn(async move { outcome }),
        }
    }

    /// Validates the draft and, if accepted, enters `Submitting`.
    fn begin_submission(&self) -> Result<(AnalysisRequest, InFlight), SubmitOutcome> {
        let rejected = {
            let mut state = lock(&self.state);
            if matches!(*state, ControllerState::Submitting) {
                debug!("Submit ignored: a request is already in flight.");
                return Err(SubmitOutcome::AlreadySubmitting);
            }
            let text = self.buffer().content().trim().to_string();
            match validate_text(&text) {
                Ok(()) => {
                    *state = ControllerState::Submitting;
                    drop(state);
                    let in_flight = InFlight::start(self.state.clone(), self.view.clone());
                    return Ok((AnalysisRequest::new(text), in_flight));
                }
                Err(e) => e,
            }
        };

        info!("Submission rejected: {}", rejected);
        self.notifications
            .notify(&rejected.to_string(), NotificationKind::Error);
        Err(SubmitOutcome::Rejected(rejected))
    }

    async fn complete(&self, request: AnalysisRequest, in_flight: InFlight) -> SubmitOutcome {
        info!(
            chars = request.text.chars().count(),
            "Submitting text for analysis."
        );

        match self.call_service(&request).await {
            Ok(result) => {
                info!(
                    sentiment = %result.sentiment,
                    confidence = result.confidence,
                    "Analysis completed."
                );
                // Render while still `Submitting` so no new request can start
                // before this result is on screen.
                self.view.display_result(&result.presentation());
                self.notifications
                    .notify(SUCCESS_MESSAGE, NotificationKind::Success);
                *lock(&self.state) = ControllerState::Displaying(result.clone());
                drop(in_flight);
                SubmitOutcome::Displayed(result)
            }
            Err(e) => {
                error!("Analysis failed: {}", e);
                let reason = e.user_message();
                self.notifications.notify(&reason, NotificationKind::Error);
                *lock(&self.state) = ControllerState::Failed(reason.clone());
                drop(in_flight);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn call_service(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let call = self.service.predict(request);
        let result = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                AnalysisError::Transport(format!(
                    "request timed out after {} ms",
                    limit.as_millis()
                ))
            })??,
            None => call.await?,
        };

        if !AnalysisResult::is_valid_confidence(result.confidence) {
            return Err(AnalysisError::Transport(format!(
                "confidence out of range: {}",
                result.confidence
            )));
        }
        Ok(result)
    }
}

/// Holds the busy indicator for the duration of one request. Dropping it
/// clears the indicator whatever the outcome, including when the request
/// future itself is dropped mid-call.
struct InFlight {
    state: Arc<Mutex<ControllerState>>,
    view: Arc<dyn AnalysisView>,
}

impl InFlight {
    fn start(state: Arc<Mutex<ControllerState>>, view: Arc<dyn AnalysisView>) -> Self {
        view.hide_result();
        view.set_busy(true);
        Self { state, view }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        {
            let mut state = lock(&self.state);
            if matches!(*state, ControllerState::Submitting) {
                *state = ControllerState::Idle;
            }
        }
        self.view.set_busy(false);
    }
}
