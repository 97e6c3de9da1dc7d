use std::time::Duration;

use chrono::{DateTime, Utc};

/// Renders an elapsed time as `{d}d {h}h {m}m {s}s`.
pub fn format_uptime(elapsed: chrono::Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    format!(
        "{}d {}h {}m {}s",
        total / 86400,
        (total % 86400) / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

pub fn uptime_since(started_at: DateTime<Utc>) -> String {
    format_uptime(Utc::now() - started_at)
}

/// Converts a validated minute count into a timeout duration.
pub fn minutes_to_duration(minutes: i64) -> Option<Duration> {
    u64::try_from(minutes)
        .ok()
        .and_then(|x| x.checked_mul(60))
        .map(Duration::from_secs)
}

pub fn short_commit(commit: Option<&str>) -> &str {
    commit.and_then(|x| x.get(0..7)).unwrap_or("unknown")
}
