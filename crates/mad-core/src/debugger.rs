//! Three-channel diagnostics sink handed to every script host.
//!
//! Each channel is an optional consumer of a formatted message. A channel
//! without a consumer drops its output; every message is still mirrored as a
//! `tracing` event under the `mad` target.

use std::fmt;
use std::sync::Arc;

pub type Printer = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Error,
    Warning,
    Information,
}

#[derive(Clone, Default)]
pub struct Diagnostics {
    error: Option<Printer>,
    warning: Option<Printer>,
    information: Option<Printer>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_printer(
        mut self,
        channel: Channel,
        printer: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.set_printer(channel, printer);
        self
    }

    pub fn set_printer(
        &mut self,
        channel: Channel,
        printer: impl Fn(&str) + Send + Sync + 'static,
    ) {
        *self.slot_mut(channel) = Some(Arc::new(printer));
    }

    pub fn clear_printer(&mut self, channel: Channel) {
        *self.slot_mut(channel) = None;
    }

    pub fn has_printer(&self, channel: Channel) -> bool {
        self.slot(channel).is_some()
    }

    pub fn print(&self, channel: Channel, message: &str) {
        match channel {
            Channel::Error => tracing::error!(target: "mad", "{}", message),
            Channel::Warning => tracing::warn!(target: "mad", "{}", message),
            Channel::Information => tracing::info!(target: "mad", "{}", message),
        }
        if let Some(printer) = self.slot(channel) {
            printer(message);
        }
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.print(Channel::Error, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.print(Channel::Warning, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.print(Channel::Information, message.as_ref());
    }

    fn slot(&self, channel: Channel) -> Option<&Printer> {
        match channel {
            Channel::Error => self.error.as_ref(),
            Channel::Warning => self.warning.as_ref(),
            Channel::Information => self.information.as_ref(),
        }
    }

    fn slot_mut(&mut self, channel: Channel) -> &mut Option<Printer> {
        match channel {
            Channel::Error => &mut self.error,
            Channel::Warning => &mut self.warning,
            Channel::Information => &mut self.information,
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("error", &self.error.is_some())
            .field("warning", &self.warning.is_some())
            .field("information", &self.information.is_some())
            .finish()
    }
}

#[cfg(test)]
mod debugger_tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn each_channel_reaches_only_its_own_printer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::clone(&seen);
        let infos = Arc::clone(&seen);
        let diagnostics = Diagnostics::new()
            .with_printer(Channel::Error, move |message| {
                errors
                    .lock()
                    .expect("lock should not be poisoned")
                    .push(format!("E:{message}"));
            })
            .with_printer(Channel::Information, move |message| {
                infos
                    .lock()
                    .expect("lock should not be poisoned")
                    .push(format!("I:{message}"));
            });

        diagnostics.error("boom");
        diagnostics.warn("dropped");
        diagnostics.info("hello");

        let seen = seen.lock().expect("lock should not be poisoned");
        assert_eq!(*seen, vec!["E:boom".to_string(), "I:hello".to_string()]);
    }

    #[test]
    fn cleared_channel_drops_output() {
        let hits = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&hits);
        let mut diagnostics = Diagnostics::new().with_printer(Channel::Warning, move |_| {
            *counter.lock().expect("lock should not be poisoned") += 1;
        });
        diagnostics.warn("one");
        diagnostics.clear_printer(Channel::Warning);
        diagnostics.warn("two");

        assert!(!diagnostics.has_printer(Channel::Warning));
        assert_eq!(*hits.lock().expect("lock should not be poisoned"), 1);
    }

    #[test]
    fn debug_output_lists_configured_channels() {
        let diagnostics = Diagnostics::new().with_printer(Channel::Error, |_| {});
        let text = format!("{diagnostics:?}");
        assert!(text.contains("error: true"));
        assert!(text.contains("warning: false"));
    }
}
