//! services/client/src/terminal/commands.rs
//!
//! Parses terminal input. Lines starting with `:` are commands and stand in for
//! the page's buttons and keyboard shortcuts; anything else replaces the draft.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The analyze button, or Ctrl+Enter.
    Analyze,
    /// The clear button, Ctrl+K, or Escape.
    Clear,
    Sample(String),
    ListSamples,
    ShowDraft,
    Help,
    Quit,
    Edit(String),
    Unknown(String),
}

pub const HELP: &str = "\
Type text to set the draft, then run a command:
  :analyze  (:a)          analyze the current draft
  :clear    (:k, :esc)    clear the draft and the result
  :sample <name|number>   load a sample text
  :samples                list the sample texts
  :show                   print the current draft
  :help     (:h)          show this help
  :quit     (:q)          exit";

pub fn parse_command(line: &str) -> Command {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Command::Edit(line.to_string());
    };

    let mut parts = command.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match name.as_str() {
        "analyze" | "a" | "submit" => Command::Analyze,
        "clear" | "k" | "esc" => Command::Clear,
        "sample" | "s" if !argument.is_empty() => Command::Sample(argument.to_string()),
        "samples" | "sample" | "s" => Command::ListSamples,
        "show" => Command::ShowDraft,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(command.trim().to_string()),
    }
}
