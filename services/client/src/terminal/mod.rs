pub mod commands;
pub mod session;
pub mod toasts;
pub mod view;

pub use commands::{parse_command, Command};
pub use session::run_session;
pub use toasts::spawn_toast_printer;
pub use view::TerminalView;
