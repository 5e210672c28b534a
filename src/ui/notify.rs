use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use super::messages::{Lang, MessageKey};

/// UI collaborator of the lifecycle manager. The busy indicator is shown for
/// the duration of a transition; success/error land once per completed
/// operation.
pub trait StatusSink: Send + Sync {
    fn busy(&self);
    fn idle(&self);
    fn success(&self, key: MessageKey);
    fn error(&self, err: &anyhow::Error);
}

/// Renders status to stderr, colored when attached to a terminal.
pub struct ConsoleStatus {
    lang: Lang,
}

impl ConsoleStatus {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    fn use_color(&self) -> bool {
        std::io::stderr().is_terminal()
    }
}

impl StatusSink for ConsoleStatus {
    fn busy(&self) {
        if self.use_color() {
            eprintln!("  {}", "working...".dimmed());
        }
    }

    fn idle(&self) {
        // The busy line simply scrolls away; nothing to erase.
    }

    fn success(&self, key: MessageKey) {
        let text = key.text(self.lang);
        if self.use_color() {
            eprintln!("  {} {}", "\u{2713}".green(), text);
        } else {
            eprintln!("  ok: {}", text);
        }
    }

    fn error(&self, err: &anyhow::Error) {
        if self.use_color() {
            eprintln!("  {} {:#}", "\u{2717}".red(), err);
        } else {
            eprintln!("  error: {:#}", err);
        }
    }
}
