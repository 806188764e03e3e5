use chrono::{DateTime, Utc};

/// Source of the current time, injected so "now" is an explicit input.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
