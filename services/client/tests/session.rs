mod common;

use client_lib::adapters::{HttpPredictionAdapter, MemoryStore};
use client_lib::terminal::{run_session, spawn_toast_printer, TerminalView};
use common::SharedOutput;
use reqwest::{Client, Url};
use sentiment_core::ports::KeyValueStore;
use sentiment_core::{
    AnalysisController, ControllerState, DraftAutosaver, InputBuffer, NotificationCenter,
    NotificationKind, DRAFT_KEY,
};
use std::sync::Arc;
use std::time::Duration;

struct Session {
    controller: Arc<AnalysisController>,
    view: Arc<TerminalView<SharedOutput>>,
    output: SharedOutput,
    notifications: NotificationCenter,
}

fn session(base: &Url, buffer: InputBuffer) -> Session {
    let output = SharedOutput::default();
    let view = Arc::new(TerminalView::new(output.clone()));
    let notifications = NotificationCenter::new();
    let prediction = Arc::new(HttpPredictionAdapter::new(Client::new(), base).unwrap());
    let controller = Arc::new(AnalysisController::new(
        buffer,
        prediction,
        view.clone(),
        Arc::new(notifications.clone()),
    ));
    Session {
        controller,
        view,
        output,
        notifications,
    }
}

fn notes(center: &NotificationCenter) -> Vec<(String, NotificationKind)> {
    center
        .active()
        .into_iter()
        .map(|n| (n.text, n.kind))
        .collect()
}

#[tokio::test]
async fn test_typed_text_is_analyzed_and_rendered() {
    let (base, received) = common::spawn_service().await;
    let s = session(&base, InputBuffer::new());

    run_session(
        s.controller.clone(),
        s.view.clone(),
        &b"I love this product!\n:analyze\n"[..],
    )
    .await
    .unwrap();

    let out = s.output.contents();
    assert!(out.contains("Positive Sentiment"), "output was: {}", out);
    assert!(out.contains("Confidence Level 92%"));
    assert!(!out.contains("(i)"));
    assert_eq!(*received.lock().unwrap(), vec!["I love this product!"]);
    assert_eq!(
        notes(&s.notifications),
        vec![(
            "Analysis completed successfully!".to_string(),
            NotificationKind::Success
        )]
    );
    assert!(!s.view.is_busy());
    assert!(s.view.is_result_visible());
}

#[tokio::test]
async fn test_whitespace_draft_never_reaches_the_service() {
    let (base, received) = common::spawn_service().await;
    let s = session(&base, InputBuffer::new());

    run_session(s.controller.clone(), s.view.clone(), &b"   \n:a\n"[..])
        .await
        .unwrap();

    assert!(received.lock().unwrap().is_empty());
    assert_eq!(
        notes(&s.notifications),
        vec![(
            "Please enter some text to analyze.".to_string(),
            NotificationKind::Error
        )]
    );
}

#[tokio::test]
async fn test_service_outage_is_reported_verbatim() {
    let (base, _) = common::spawn_service().await;
    let s = session(&base, InputBuffer::new());

    run_session(s.controller.clone(), s.view.clone(), &b"down\n:analyze\n"[..])
        .await
        .unwrap();

    assert_eq!(
        notes(&s.notifications),
        vec![("model unavailable".to_string(), NotificationKind::Error)]
    );
    assert!(!s.view.is_busy());
    assert!(!s.view.is_result_visible());
    assert!(!s.output.contents().contains("Sentiment"));
    assert_eq!(
        s.controller.state(),
        ControllerState::Failed("model unavailable".to_string())
    );
}

#[tokio::test]
async fn test_sample_then_clear() {
    let (base, received) = common::spawn_service().await;
    let s = session(&base, InputBuffer::new());

    run_session(
        s.controller.clone(),
        s.view.clone(),
        &b":sample negative\n:analyze\n"[..],
    )
    .await
    .unwrap();
    assert!(s.view.is_result_visible());

    run_session(s.controller.clone(), s.view.clone(), &b":clear\n"[..])
        .await
        .unwrap();

    assert_eq!(received.lock().unwrap().len(), 1);
    assert!(s.controller.buffer().is_empty());
    assert!(!s.view.is_result_visible());
    let texts: Vec<String> = notes(&s.notifications).into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        texts.first().map(String::as_str),
        Some("Sample text loaded! Click Analyze to see the result.")
    );
    assert_eq!(texts.last().map(String::as_str), Some("Text cleared successfully!"));
}

#[tokio::test]
async fn test_restored_draft_is_submitted_and_edits_are_saved() {
    let (base, received) = common::spawn_service().await;
    let store = Arc::new(MemoryStore::new());
    store.set(DRAFT_KEY, "I hate waiting").unwrap();

    let autosaver = DraftAutosaver::with_delay(store.clone(), Duration::from_secs(60));
    let saved = autosaver.load().unwrap_or_default();
    let mut buffer = InputBuffer::with_autosave(autosaver);
    assert!(buffer.restore(&saved));
    let s = session(&base, buffer);

    run_session(
        s.controller.clone(),
        s.view.clone(),
        &b":analyze\nnext draft\n:quit\nignored after quit\n"[..],
    )
    .await
    .unwrap();

    assert_eq!(*received.lock().unwrap(), vec!["I hate waiting"]);
    assert!(s.output.contents().contains("Negative Sentiment"));
    assert_eq!(
        store.get(DRAFT_KEY).unwrap().as_deref(),
        Some("next draft"),
        "quitting flushes the pending autosave"
    );
}

#[tokio::test]
async fn test_toasts_are_printed_as_they_arrive() {
    let (base, _) = common::spawn_service().await;
    let s = session(&base, InputBuffer::new());
    let printer = spawn_toast_printer(&s.notifications, s.view.clone());

    run_session(s.controller.clone(), s.view.clone(), &b"down\n:analyze\n"[..])
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    printer.abort();

    assert!(s.output.contents().contains("✖ model unavailable"));
}

#[tokio::test]
async fn test_slow_service_hits_the_request_timeout() {
    let (base, _) = common::spawn_service().await;
    let output = SharedOutput::default();
    let view = Arc::new(TerminalView::new(output.clone()));
    let notifications = NotificationCenter::new();
    let prediction = Arc::new(HttpPredictionAdapter::new(Client::new(), &base).unwrap());
    let controller = Arc::new(
        AnalysisController::new(
            InputBuffer::new(),
            prediction,
            view.clone(),
            Arc::new(notifications.clone()),
        )
        .with_request_timeout(Some(Duration::from_millis(200))),
    );

    run_session(controller.clone(), view.clone(), &b"slow\n:analyze\n"[..])
        .await
        .unwrap();

    assert_eq!(
        notes(&notifications),
        vec![(
            "Failed to analyze text. Please try again.".to_string(),
            NotificationKind::Error
        )]
    );
    assert!(!view.is_busy());
    assert!(!view.is_result_visible());
}
