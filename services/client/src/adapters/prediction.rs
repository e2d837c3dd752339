//! services/client/src/adapters/prediction.rs
//!
//! This module contains the HTTP adapter for the remote prediction service.
//! It implements the `PredictionService` port from the `core` crate.

use async_trait::async_trait;
use reqwest::{Client, Url};
use sentiment_core::domain::{AnalysisRequest, AnalysisResult, Sentiment};
use sentiment_core::ports::{PortError, PortResult, PredictionService};
use serde::{Deserialize, Serialize};
use tracing::debug;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    sentiment: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `PredictionService` over `POST /predict`.
#[derive(Clone)]
pub struct HttpPredictionAdapter {
    client: Client,
    endpoint: Url,
}

impl HttpPredictionAdapter {
    /// Creates a new adapter for the service rooted at `base_url`.
    pub fn new(client: Client, base_url: &Url) -> PortResult<Self> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("predict")
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

//=========================================================================================
// `PredictionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PredictionService for HttpPredictionAdapter {
    async fn predict(&self, request: &AnalysisRequest) -> PortResult<AnalysisResult> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&PredictRequest {
                text: &request.text,
            })
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Prediction service returned {}: {}", status, body);
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error);
            return Err(PortError::Service {
                status: status.as_u16(),
                reason,
            });
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| PortError::MalformedResponse(e.to_string()))?;

        let sentiment = body
            .sentiment
            .parse::<Sentiment>()
            .map_err(|e| PortError::MalformedResponse(e.to_string()))?;

        Ok(AnalysisResult {
            sentiment,
            confidence: body.confidence.unwrap_or(0.0),
            message: body.message,
        })
    }
}
