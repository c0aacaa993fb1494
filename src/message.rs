use std::time::Duration;

/// A status message which is cleared again after a fixed delay.
#[derive(Debug, Default)]
pub struct Message {
    text: Option<&'static str>,
    version: u64,
}

/// Clearing requested when showing a message, to be run by the host after `after` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledClear {
    pub version: u64,
    pub after: Duration,
}

impl Message {
    pub fn text(&self) -> Option<&'static str> {
        self.text
    }

    pub fn show(&mut self, text: &'static str, after: Duration) -> ScheduledClear {
        self.text = Some(text);
        self.version += 1;

        ScheduledClear {
            version: self.version,
            after,
        }
    }

    /// Only clears the message shown by the matching call to [`Message::show`].
    pub fn clear(&mut self, version: u64) -> bool {
        if self.version != version || self.text.is_none() {
            return false;
        }

        self.text = None;

        true
    }
}
