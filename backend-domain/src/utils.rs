use chrono::{DateTime, TimeZone, Utc};

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// `None` when `ms` falls outside chrono's representable range.
pub fn millis_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}
