//! services/client/src/terminal/view.rs
//!
//! A line-oriented rendering of the analysis page. Implements the `AnalysisView`
//! port and prints toasts and status lines for the session loop.

use colored::{Color, Colorize};
use sentiment_core::domain::{
    CounterLevel, Notification, NotificationKind, ResultPresentation, SentimentIcon, Tone,
    MAX_LENGTH,
};
use sentiment_core::ports::AnalysisView;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::warn;

/// Cells in the confidence bar track.
const BAR_WIDTH: usize = 40;

pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
    busy: AtomicBool,
    result_visible: AtomicBool,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            busy: AtomicBool::new(false),
            result_visible: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn is_result_visible(&self) -> bool {
        self.result_visible.load(Ordering::SeqCst)
    }

    /// Prints a plain status line.
    pub fn line(&self, text: &str) {
        self.write_lines(&[text.to_string()]);
    }

    pub fn toast(&self, notification: &Notification) {
        let (mark, color) = match notification.kind {
            NotificationKind::Success => ("✔", Color::Green),
            NotificationKind::Error => ("✖", Color::Red),
        };
        let text = format!("{} {}", mark, notification.text);
        self.write_lines(&[text.color(color).to_string()]);
    }

    /// Prints the character counter for a draft of `length` characters.
    pub fn counter(&self, length: usize, level: CounterLevel) {
        let color = match level {
            CounterLevel::Normal => Color::BrightBlack,
            CounterLevel::Warning => Color::Yellow,
            CounterLevel::Critical => Color::Red,
        };
        let text = format!("{}/{} characters", length, MAX_LENGTH);
        self.write_lines(&[text.color(color).to_string()]);
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        for line in lines {
            if let Err(e) = writeln!(out, "{}", line) {
                warn!("Failed to write to terminal: {}", e);
                return;
            }
        }
        let _ = out.flush();
    }
}

impl<W: Write + Send> AnalysisView for TerminalView<W> {
    fn display_result(&self, presentation: &ResultPresentation) {
        let color = tone_color(presentation.tone);
        let mut lines = render_result(presentation);
        if let Some(headline) = lines.first_mut() {
            *headline = headline.color(color).bold().to_string();
        }
        self.write_lines(&lines);
        self.result_visible.store(true, Ordering::SeqCst);
    }

    fn hide_result(&self) {
        self.result_visible.store(false, Ordering::SeqCst);
    }

    fn set_busy(&self, busy: bool) {
        let was_busy = self.busy.swap(busy, Ordering::SeqCst);
        if busy && !was_busy {
            self.line("Analyzing...");
        }
    }
}

/// Renders a tone in its palette color as a 24-bit terminal color.
fn tone_color(tone: Tone) -> Color {
    hex_color(tone.hex()).unwrap_or(Color::White)
}

/// Parses `#rrggbb`.
fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').filter(|d| d.len() == 6)?;
    let channel = |at: usize| {
        digits
            .get(at..at + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
    };
    Some(Color::TrueColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn icon_glyph(icon: SentimentIcon) -> &'static str {
    match icon {
        SentimentIcon::Smile => ":)",
        SentimentIcon::Frown => ":(",
        SentimentIcon::Meh => ":|",
    }
}

/// Renders a result as uncolored lines: headline, optional confidence, optional advisory.
pub fn render_result(presentation: &ResultPresentation) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        icon_glyph(presentation.icon),
        presentation.label
    )];

    if let Some(bar) = presentation.confidence {
        lines.push(format!("Confidence Level {}%", bar.percent));
        lines.push(render_bar(bar.percent));
    }
    if let Some(advisory) = &presentation.advisory {
        lines.push(format!("(i) {}", advisory));
    }
    lines
}

/// Fills the bar track proportionally to `percent`.
pub fn render_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
