//! crates/sentiment_core/src/ports.rs
//!
//! Defines the service contracts (traits) the controller depends on.
//! The prediction service, the rendering surface and the draft store are all
//! injected, so the core never touches a network, a screen or a disk directly.

use async_trait::async_trait;
use crate::domain::{AnalysisRequest, AnalysisResult, NotificationKind, ResultPresentation};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The service could not be reached, or the call timed out.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The service answered, but the body could not be interpreted.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The service answered with a non-success status.
    #[error("Service responded with status {status}")]
    Service { status: u16, reason: Option<String> },
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Classifies the request text. Single shot; no streaming or partial results.
    async fn predict(&self, request: &AnalysisRequest) -> PortResult<AnalysisResult>;
}

/// The rendering surface of the analysis page.
pub trait AnalysisView: Send + Sync {
    fn display_result(&self, presentation: &ResultPresentation);
    fn hide_result(&self);
    /// Shows the busy indicator and disables the analyze trigger.
    fn set_busy(&self, busy: bool);
}

/// Fire-and-forget channel for user-visible messages.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, text: &str, kind: NotificationKind);
}

/// Best-effort string storage for the draft.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PortResult<()>;
}
