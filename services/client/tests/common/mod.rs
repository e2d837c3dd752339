//! Shared helpers: a stand-in prediction service served by axum on an ephemeral port.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Texts received by the stand-in service, in order.
pub type Received = Arc<Mutex<Vec<String>>>;

async fn predict(State(received): State<Received>, Json(body): Json<Value>) -> Response {
    let text = body["text"].as_str().unwrap_or_default().to_string();
    received.lock().unwrap().push(text.clone());

    match text.as_str() {
        "down" => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "model unavailable" })),
        )
            .into_response(),
        "crash" => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response(),
        "garbage" => Json(json!({ "sentiment": "Elated", "confidence": 50 })).into_response(),
        "not bad" => Json(json!({
            "sentiment": "Mixed",
            "confidence": 0,
            "message": "The sentence contains both positive and negative sentiments."
        }))
        .into_response(),
        "slow" => {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Json(json!({ "sentiment": "Positive", "confidence": 99 })).into_response()
        }
        "" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Please enter a sentence to analyze." })),
        )
            .into_response(),
        t if t.contains("hate") => {
            Json(json!({ "sentiment": "Negative", "confidence": 87.5 })).into_response()
        }
        _ => Json(json!({ "sentiment": "Positive", "confidence": 92 })).into_response(),
    }
}

/// Starts the stand-in service and returns its base URL.
pub async fn spawn_service() -> (Url, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/predict", post(predict))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (Url::parse(&format!("http://{}", addr)).unwrap(), received)
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// A writer whose contents the test can read back.
#[derive(Clone, Default)]
pub struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
