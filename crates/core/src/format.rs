//! Pure formatting helpers used when turning raw readings into event values.

use std::time::Duration;

const MIB: f64 = 1024.0 * 1024.0;
const GIB: u64 = 1024 * 1024 * 1024;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a float the way a shortest-repr formatter does, always keeping a
/// fractional part (`1.0`, `12.34`, `0.5`).
pub fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') && !text.contains('e') {
        format!("{}.0", text)
    } else {
        text
    }
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / MIB)
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / GIB as f64)
}

/// Byte count in GB when at least one binary gigabyte, otherwise in MB.
pub fn format_data_size(bytes: u64) -> String {
    if bytes >= GIB {
        format!("{} GB", format_float(bytes_to_gb(bytes)))
    } else {
        format!("{} MB", format_float(bytes_to_mb(bytes)))
    }
}

/// `"<days> days, H:MM:SS"`, sub-second input truncated.
pub fn seconds_to_human_readable(seconds: u64) -> String {
    let days = seconds / 86_400;
    let rem = seconds % 86_400;
    format!(
        "{} days, {}:{:02}:{:02}",
        days,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

pub fn duration_to_human_readable(duration: Duration) -> String {
    seconds_to_human_readable(duration.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reparse(text: &str) -> u64 {
        let (days, clock) = text.split_once(" days, ").unwrap();
        let parts: Vec<u64> = clock.split(':').map(|p| p.parse().unwrap()).collect();
        days.parse::<u64>().unwrap() * 86_400 + parts[0] * 3600 + parts[1] * 60 + parts[2]
    }

    #[test]
    fn test_format_data_size_threshold() {
        assert_eq!(format_data_size(GIB), "1.0 GB");
        assert_eq!(format_data_size(GIB - 1), "1024.0 MB");
        assert_eq!(format_data_size(0), "0.0 MB");
        assert_eq!(format_data_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_data_size(3 * GIB / 2), "1.5 GB");
    }

    #[test]
    fn test_format_data_size_rounding() {
        // 12.3456 MiB
        let bytes = (12.3456 * MIB) as u64;
        assert_eq!(format_data_size(bytes), "12.35 MB");
        assert!(format_data_size(5 * GIB + 123_456_789).ends_with(" GB"));
    }

    #[test]
    fn test_seconds_to_human_readable() {
        assert_eq!(seconds_to_human_readable(0), "0 days, 0:00:00");
        assert_eq!(seconds_to_human_readable(5), "0 days, 0:00:05");
        assert_eq!(seconds_to_human_readable(3_723), "0 days, 1:02:03");
        assert_eq!(seconds_to_human_readable(86_400 + 7_384), "1 days, 2:03:04");
        assert_eq!(
            duration_to_human_readable(Duration::from_millis(61_999)),
            "0 days, 0:01:01"
        );
    }

    #[test]
    fn test_human_readable_reparses_to_same_seconds() {
        for seconds in [0, 59, 60, 3_599, 3_600, 86_399, 86_400, 1_000_000, 987_654_321] {
            assert_eq!(reparse(&seconds_to_human_readable(seconds)), seconds);
        }
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(42.0), "42.0");
        assert_eq!(format_float(12.34), "12.34");
        assert_eq!(format_float(0.5), "0.5");
    }
}
