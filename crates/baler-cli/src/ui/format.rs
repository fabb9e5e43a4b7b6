//! Human-readable formatting for build summaries.

use std::time::Duration;

/// Format a byte count: `417 B`, `1.2 kB`, `3.4 MB`.
pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1_000.0;
    const MB: f64 = 1_000_000.0;
    let bytes = bytes as f64;
    if bytes < KB {
        format!("{bytes:.0} B")
    } else if bytes < MB {
        format!("{:.1} kB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes / MB)
    }
}

/// Format a duration: `87 ms` below a second, `1.42 s` above.
pub fn human_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1_000 {
        format!("{millis} ms")
    } else {
        format!("{:.2} s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(human_size(417), "417 B");
        assert_eq!(human_size(1_234), "1.2 kB");
        assert_eq!(human_size(3_400_000), "3.4 MB");
    }

    #[test]
    fn durations() {
        assert_eq!(human_duration(Duration::from_millis(87)), "87 ms");
        assert_eq!(human_duration(Duration::from_millis(1_420)), "1.42 s");
    }
}
