//! services/client/src/terminal/session.rs
//!
//! The input loop of a terminal session. Each line is routed to the controller;
//! analyses finish on background tasks so the draft stays editable meanwhile.

use crate::terminal::commands::{parse_command, Command, HELP};
use crate::terminal::view::TerminalView;
use sentiment_core::buffer::samples;
use sentiment_core::controller::{AnalysisController, SubmitOutcome};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Runs until `:quit` or end of input, then waits for any analysis still running
/// and flushes the draft to the store.
pub async fn run_session<R, W>(
    controller: Arc<AnalysisController>,
    view: Arc<TerminalView<W>>,
    input: R,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let mut lines = input.lines();
    let mut analyses: Vec<JoinHandle<SubmitOutcome>> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Analyze => {
                if view.is_busy() {
                    view.line("An analysis is already running.");
                    continue;
                }
                analyses.push(controller.spawn_submit());
            }
            Command::Clear => controller.clear(),
            Command::Sample(key) => {
                if controller.load_sample(&key) {
                    print_draft(&controller, &view);
                } else {
                    view.line(&format!("No sample named '{}'. Try :samples.", key));
                }
            }
            Command::ListSamples => {
                for (i, sample) in samples().iter().enumerate() {
                    view.line(&format!("  {}. {:<10} {}", i + 1, sample.name, sample.text));
                }
            }
            Command::ShowDraft => print_draft(&controller, &view),
            Command::Help => view.line(HELP),
            Command::Quit => break,
            Command::Edit(text) => {
                controller.edit(text);
                let buffer = controller.buffer();
                view.counter(buffer.len(), buffer.counter_level());
            }
            Command::Unknown(command) => {
                view.line(&format!("Unknown command ':{}'. Type :help.", command))
            }
        }

        analyses.retain(|task| !task.is_finished());
    }

    for task in analyses {
        log_outcome(task.await);
    }
    controller.buffer().flush();
    info!("Session ended.");
    Ok(())
}

fn print_draft<W: Write + Send>(controller: &AnalysisController, view: &TerminalView<W>) {
    let buffer = controller.buffer();
    if buffer.is_empty() {
        view.line("(draft is empty)");
    } else {
        view.line(buffer.content());
    }
    view.counter(buffer.len(), buffer.counter_level());
}

fn log_outcome(finished: Result<SubmitOutcome, tokio::task::JoinError>) {
    match finished {
        Ok(outcome) => debug!("Analysis task finished: {:?}", outcome),
        Err(e) => debug!("Analysis task did not complete: {}", e),
    }
}
