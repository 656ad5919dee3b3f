use chrono::{DateTime, Utc};

/// Clock abstraction for testability
pub trait Clock: Send + Sync {
    /// Get the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
