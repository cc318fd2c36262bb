// # Clock Trait
//
// Source of audit timestamps. Injected so tests get deterministic lines.

use chrono::NaiveDateTime;

/// Wall-clock time source
pub trait Clock: Send + Sync {
    /// Current local time
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
