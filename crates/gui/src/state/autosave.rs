//! Periodic autosave for the open world

use std::time::{Duration, Instant};

/// Fires at most once per interval, and only after the topology changed
#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    interval: Duration,
    last_save: Instant,
    saved_version: u64,
    active: bool,
}

impl AutosaveTimer {
    pub fn new(interval: Duration, version: u64, now: Instant) -> Self {
        Self {
            interval,
            last_save: now,
            saved_version: version,
            active: true,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a save should run for `version` at `now`
    pub fn due(&self, now: Instant, version: u64) -> bool {
        self.active
            && version != self.saved_version
            && now.saturating_duration_since(self.last_save) >= self.interval
    }

    /// Whether `version` differs from what was last written
    pub fn is_dirty(&self, version: u64) -> bool {
        version != self.saved_version
    }

    pub fn mark_saved(&mut self, now: Instant, version: u64) {
        self.last_save = now;
        self.saved_version = version;
    }

    /// Wait a full interval before the next attempt, keeping the dirty state
    pub fn defer(&mut self, now: Instant) {
        self.last_save = now;
    }

    /// Stop firing; used when the session closes
    pub fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_without_changes() {
        let t0 = Instant::now();
        let timer = AutosaveTimer::new(Duration::from_secs(6), 1, t0);
        assert!(!timer.due(t0 + Duration::from_secs(60), 1));
    }

    #[test]
    fn test_due_after_interval() {
        let t0 = Instant::now();
        let timer = AutosaveTimer::new(Duration::from_secs(6), 1, t0);
        assert!(!timer.due(t0 + Duration::from_secs(5), 2));
        assert!(timer.due(t0 + Duration::from_secs(6), 2));
    }

    #[test]
    fn test_mark_saved_resets() {
        let t0 = Instant::now();
        let mut timer = AutosaveTimer::new(Duration::from_secs(6), 1, t0);
        let t1 = t0 + Duration::from_secs(7);
        timer.mark_saved(t1, 2);
        assert!(!timer.is_dirty(2));
        assert!(!timer.due(t1 + Duration::from_secs(7), 2));
        assert!(timer.due(t1 + Duration::from_secs(7), 3));
    }

    #[test]
    fn test_defer_keeps_dirty() {
        let t0 = Instant::now();
        let mut timer = AutosaveTimer::new(Duration::from_secs(6), 1, t0);
        let t1 = t0 + Duration::from_secs(6);
        timer.defer(t1);
        assert!(timer.is_dirty(2));
        assert!(!timer.due(t1 + Duration::from_secs(1), 2));
        assert!(timer.due(t1 + Duration::from_secs(6), 2));
    }

    #[test]
    fn test_cancelled_never_due() {
        let t0 = Instant::now();
        let mut timer = AutosaveTimer::new(Duration::from_secs(1), 1, t0);
        timer.cancel();
        assert!(!timer.is_active());
        assert!(!timer.due(t0 + Duration::from_secs(10), 5));
    }
}
