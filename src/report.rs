//! Plain-text rendering helpers
//!
//! Durations are printed in the compact style used by cluster tooling
//! (`250ms`, `1.5s`, `2m5s`) so reports line up with the load-test logs.

use crate::regression::OperationKey;
use std::time::Duration;

/// Format a duration at millisecond resolution
///
/// # Example
/// ```
/// use api_responsiveness::report::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
/// assert_eq!(format_duration(Duration::from_millis(125_000)), "2m5s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms == 0 {
        return "0s".to_string();
    }
    if total_ms < 1000 {
        return format!("{}ms", total_ms);
    }

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;

    let mut secs = seconds.to_string();
    if millis > 0 {
        let frac = format!("{:03}", millis);
        secs.push('.');
        secs.push_str(frac.trim_end_matches('0'));
    }

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Render a traffic-volume ranking, one `<count> <key>` line per entry
pub fn render_ranking(ranked: &[(i64, OperationKey)]) -> String {
    let mut out = String::new();
    for (count, key) in ranked {
        out.push_str(&format!("{} {}\n", count, key));
    }
    out
}
