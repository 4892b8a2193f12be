use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time for header timestamps.
pub trait Clock {
    /// Current time in seconds since UNIX_EPOCH.
    fn now_secs(&self) -> u64;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        // A clock before the epoch reads as zero; the parent timestamp then
        // decides.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}
