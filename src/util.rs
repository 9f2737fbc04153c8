use std::time::{SystemTime, UNIX_EPOCH};

pub fn get_current_timestamp() -> u64 {
    let now = SystemTime::now();
    // A clock set before the epoch only skews the reported timings.
    let duration_since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    duration_since_epoch.as_micros() as u64
}

/// Microseconds elapsed since `start`, a value of `get_current_timestamp`.
pub fn elapsed_micros(start: u64) -> u64 {
    get_current_timestamp().saturating_sub(start)
}
