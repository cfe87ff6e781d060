//! Event handling and user feedback

use crate::logging::log_event_with_tracing;
use console::{style, Term};
use spout_events::{AppEvent, DownloadEvent, GeneralEvent, RegistryEvent, SelectionEvent};

/// Routes events to the log and surfaces the ones users need to see
pub struct EventHandler {
    /// Write warnings to stderr
    interactive: bool,
    debug_enabled: bool,
    term: Term,
}

impl EventHandler {
    /// Create new event handler
    ///
    /// A non-interactive handler (JSON mode) only logs.
    pub fn new(interactive: bool, debug_enabled: bool) -> Self {
        Self {
            interactive,
            debug_enabled,
            term: Term::stderr(),
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);

        if !self.interactive {
            return;
        }

        match &event {
            AppEvent::Selection(SelectionEvent::TagPatternIgnored { pattern, requested }) => {
                self.show_warning(&format!(
                    "wheel tag pattern '{pattern}' ignored for distribution type {requested}"
                ));
            }
            AppEvent::General(GeneralEvent::Warning { message, context }) => match context {
                Some(context) => self.show_warning(&format!("{message} ({context})")),
                None => self.show_warning(message),
            },
            AppEvent::Registry(RegistryEvent::UnparsableVersion { package, version })
                if self.debug_enabled =>
            {
                self.show_warning(&format!(
                    "{package}: release '{version}' is not a valid version"
                ));
            }
            AppEvent::Download(DownloadEvent::Retrying {
                attempt,
                max_attempts,
                reason,
                ..
            }) => {
                self.show_warning(&format!(
                    "request failed ({reason}), retrying ({attempt}/{})",
                    max_attempts - 1
                ));
            }
            AppEvent::General(GeneralEvent::DebugLog { message }) if self.debug_enabled => {
                let _ = self.term.write_line(&format!("{} {message}", style("debug:").dim()));
            }
            _ => {}
        }
    }

    fn show_warning(&self, message: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {message}", style("Warning:").yellow().bold()));
    }
}
