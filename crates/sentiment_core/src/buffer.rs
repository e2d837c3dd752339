//! crates/sentiment_core/src/buffer.rs
//!
//! The single source of truth for the draft text.
//! Nothing here validates; length limits are enforced when the draft is submitted.

use crate::autosave::DraftAutosaver;
use crate::domain::{CounterLevel, Sample, SAMPLES};

#[derive(Default)]
pub struct InputBuffer {
    content: String,
    autosave: Option<DraftAutosaver>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer whose every edit schedules a debounced save.
    pub fn with_autosave(autosave: DraftAutosaver) -> Self {
        Self {
            content: String::new(),
            autosave: Some(autosave),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Length in characters, as shown by the counter.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn counter_level(&self) -> CounterLevel {
        CounterLevel::for_length(self.len())
    }

    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.persist();
    }

    /// Curated samples are loaded as-is, even past the submission limit.
    pub fn load_sample(&mut self, text: impl Into<String>) {
        self.set_content(text);
    }

    pub fn clear(&mut self) {
        self.set_content(String::new());
    }

    /// Applies a draft saved by a previous session. An edit that raced ahead of
    /// startup wins: the saved text is only used when the buffer is empty.
    pub fn restore(&mut self, saved: &str) -> bool {
        if !self.content.is_empty() {
            return false;
        }
        self.content = saved.to_string();
        true
    }

    /// Writes any pending autosave immediately.
    pub fn flush(&self) {
        if let Some(autosave) = &self.autosave {
            autosave.flush();
        }
    }

    fn persist(&self) {
        if let Some(autosave) = &self.autosave {
            autosave.schedule(&self.content);
        }
    }
}

/// The curated sample catalogue.
pub fn samples() -> &'static [Sample] {
    SAMPLES
}

/// Looks a sample up by name (case-insensitive) or by its 1-based position.
pub fn find_sample(key: &str) -> Option<&'static Sample> {
    let key = key.trim();
    if let Ok(position) = key.parse::<usize>() {
        return position.checked_sub(1).and_then(|i| SAMPLES.get(i));
    }
    SAMPLES.iter().find(|s| s.name.eq_ignore_ascii_case(key))
}
