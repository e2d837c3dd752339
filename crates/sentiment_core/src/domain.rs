//! crates/sentiment_core/src/domain.rs
//!
//! Defines the pure, core data structures for the sentiment client.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The maximum number of characters a submitted text may contain.
pub const MAX_LENGTH: usize = 1000;

//=========================================================================================
// Analysis Request & Result
//=========================================================================================

/// A submission that passed validation; holds the trimmed draft text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

impl AnalysisRequest {
    /// Stamps `text` with the current time. Callers validate first.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// The sentiment classes the prediction service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Mixed,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a sentiment label is not one of the three known classes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sentiment label: {0}")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(Sentiment::Positive),
            "Negative" => Ok(Sentiment::Negative),
            "Mixed" => Ok(Sentiment::Mixed),
            other => Err(UnknownSentiment(other.to_string())),
        }
    }
}

/// The interpreted response of a successful prediction call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Percentage in `[0, 100]`. Zero means the service did not report one.
    pub confidence: f64,
    /// Advisory text, e.g. for low-confidence or mixed analyses.
    pub message: Option<String>,
}

impl AnalysisResult {
    /// Whether a confidence value is one the client can display.
    pub fn is_valid_confidence(confidence: f64) -> bool {
        confidence.is_finite() && (0.0..=100.0).contains(&confidence)
    }

    /// Builds the render payload for this result.
    pub fn presentation(&self) -> ResultPresentation {
        let confidence = (self.confidence > 0.0).then(|| ConfidenceBar {
            percent: self.confidence,
        });
        let advisory = self
            .message
            .as_ref()
            .filter(|m| !m.trim().is_empty())
            .cloned();

        ResultPresentation {
            sentiment: self.sentiment,
            label: format!("{} Sentiment", self.sentiment),
            icon: SentimentIcon::for_sentiment(self.sentiment),
            tone: Tone::for_sentiment(self.sentiment),
            confidence,
            advisory,
        }
    }
}

//=========================================================================================
// Presentation
//=========================================================================================

/// Icon identity shown next to the sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentIcon {
    Smile,
    Frown,
    Meh,
}

impl SentimentIcon {
    fn for_sentiment(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => SentimentIcon::Smile,
            Sentiment::Negative => SentimentIcon::Frown,
            Sentiment::Mixed => SentimentIcon::Meh,
        }
    }
}

/// Color treatment of a result. One palette for every front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Mixed,
}

impl Tone {
    fn for_sentiment(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => Tone::Positive,
            Sentiment::Negative => Tone::Negative,
            Sentiment::Mixed => Tone::Mixed,
        }
    }

    /// Hex color of this tone.
    pub fn hex(&self) -> &'static str {
        match self {
            Tone::Positive => "#059669",
            Tone::Negative => "#dc2626",
            Tone::Mixed => "#d97706",
        }
    }
}

/// The confidence bar; `percent` is the fill width as a share of the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBar {
    pub percent: f64,
}

/// Everything a view needs to render a `Displaying` state.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPresentation {
    pub sentiment: Sentiment,
    pub label: String,
    pub icon: SentimentIcon,
    pub tone: Tone,
    /// Absent when the service reported no confidence.
    pub confidence: Option<ConfidenceBar>,
    /// Supplementary panel below the primary result.
    pub advisory: Option<String>,
}

//=========================================================================================
// Notifications
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Where a notification is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    /// The exit transition is running; removal follows.
    Leaving,
}

/// A transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub text: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub phase: NotificationPhase,
}

impl Notification {
    pub fn new(text: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            kind,
            created_at: Utc::now(),
            phase: NotificationPhase::Visible,
        }
    }
}

//=========================================================================================
// Samples & Character Counter
//=========================================================================================

/// A curated example text the user can load into the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub name: &'static str,
    pub text: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "positive",
        text: "I absolutely love this product! It exceeded all my expectations and the customer service was outstanding.",
    },
    Sample {
        name: "negative",
        text: "This was a terrible experience. The item arrived broken and nobody answered my emails for two weeks.",
    },
    Sample {
        name: "mixed",
        text: "The food was not bad, but the service was slow and the prices were higher than I expected.",
    },
    Sample {
        name: "review",
        text: "The movie had stunning visuals and a great soundtrack. The plot dragged in the middle, yet the ending made up for it.",
    },
];

/// Coloring band of the character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Critical,
}

impl CounterLevel {
    pub const WARNING_THRESHOLD: usize = 700;
    pub const CRITICAL_THRESHOLD: usize = 900;

    pub fn for_length(length: usize) -> Self {
        if length > Self::CRITICAL_THRESHOLD {
            CounterLevel::Critical
        } else if length > Self::WARNING_THRESHOLD {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        }
    }
}
