//! Time formatting for the detections log and the transport bar.

/// `mm:ss` with minutes wrapping at the hour, fractional seconds dropped.
pub fn format_timestamp(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!("{:02}:{:02}", (total / 60) % 60, total % 60)
}

/// `m:ss` with unbounded minutes.
pub fn format_clock(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!("{}:{:02}", total / 60, total % 60)
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}
