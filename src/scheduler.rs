use std::time::{Duration, Instant};

pub const MIN_REFRESH_MINUTES: u32 = 1;
pub const MAX_REFRESH_MINUTES: u32 = 120;

/// Clamp a requested interval to the supported range. Out-of-range values
/// are clamped, never rejected.
pub fn clamp_refresh_minutes(minutes: i64) -> u32 {
    minutes.clamp(MIN_REFRESH_MINUTES as i64, MAX_REFRESH_MINUTES as i64) as u32
}

/// Polling policy for the container list. The scheduler only does due-time
/// arithmetic; the event loop consumes due ticks via `take_due` and runs the
/// actual fetch, so manual refresh and the timer share one fetch path.
pub struct RefreshScheduler {
    minutes: u32,
    enabled: bool,
    next_due: Option<Instant>,
}

impl RefreshScheduler {
    pub fn new(minutes: i64, enabled: bool) -> Self {
        Self {
            minutes: clamp_refresh_minutes(minutes),
            enabled,
            // an enabled scheduler owes an immediate first fetch
            next_due: enabled.then(Instant::now),
        }
    }

    /// Arm (or re-arm) the timer: the next fetch is due immediately, then
    /// every interval after that.
    pub fn start(&mut self, now: Instant) {
        self.enabled = true;
        self.next_due = Some(now);
    }

    /// Disarm the timer. Calling `stop` when not running is a no-op.
    pub fn stop(&mut self) {
        self.enabled = false;
        self.next_due = None;
    }

    /// Update the interval. While enabled this re-arms with the new period
    /// (including the immediate fetch `start` performs); while disabled it
    /// only stores the preference.
    pub fn set_minutes(&mut self, minutes: i64, now: Instant) {
        self.minutes = clamp_refresh_minutes(minutes);
        if self.enabled {
            self.next_due = Some(now);
        }
    }

    pub fn adjust_minutes(&mut self, delta: i64, now: Instant) {
        self.set_minutes(self.minutes as i64 + delta, now);
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.minutes as u64 * 60)
    }

    /// Consume a due tick. Returns true at most once per armed deadline and
    /// re-arms for one period later.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period());
                true
            }
            _ => false,
        }
    }
}
