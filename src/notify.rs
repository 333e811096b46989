use std::time::{Duration, Instant};

/// Default lifetime of a status message.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3500);

#[derive(Debug)]
struct Notice {
    message: String,
    posted: Instant,
    ttl: Duration,
}

/// Transient user-visible status messages. A newer message replaces the
/// current one; an expired message reads as absent.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a message with the default lifetime.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notify_for(message, DEFAULT_TTL);
    }

    /// Post a message with an explicit lifetime.
    pub fn notify_for(&mut self, message: impl Into<String>, ttl: Duration) {
        self.current = Some(Notice {
            message: message.into(),
            posted: Instant::now(),
            ttl,
        });
    }

    /// The live message, if any.
    pub fn current(&self) -> Option<&str> {
        self.current_at(Instant::now())
    }

    fn current_at(&self, at: Instant) -> Option<&str> {
        let notice = self.current.as_ref()?;
        if at.duration_since(notice.posted) < notice.ttl {
            Some(&notice.message)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let notifier = Notifier::new();
        assert_eq!(notifier.current(), None);
    }

    #[test]
    fn test_live_until_ttl() {
        let mut notifier = Notifier::new();
        notifier.notify("hello");

        let posted = notifier.current.as_ref().unwrap().posted;
        assert_eq!(notifier.current_at(posted), Some("hello"));
        assert_eq!(
            notifier.current_at(posted + Duration::from_millis(3499)),
            Some("hello")
        );
        assert_eq!(notifier.current_at(posted + Duration::from_millis(3500)), None);
    }

    #[test]
    fn test_newer_message_replaces() {
        let mut notifier = Notifier::new();
        notifier.notify("first");
        notifier.notify_for("second", Duration::from_millis(2000));

        let posted = notifier.current.as_ref().unwrap().posted;
        assert_eq!(notifier.current_at(posted), Some("second"));
        assert_eq!(notifier.current_at(posted + Duration::from_millis(2000)), None);
    }

    #[test]
    fn test_clear() {
        let mut notifier = Notifier::new();
        notifier.notify("hello");
        notifier.clear();
        assert_eq!(notifier.current(), None);
    }
}
