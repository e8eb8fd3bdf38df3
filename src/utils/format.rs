use chrono::{DateTime, Utc};

/// Human readable age of a timestamp ("just now", "5 min ago", "3 h ago", "2 d ago").
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(at).num_seconds();
    if seconds < 0 {
        return at.format("%Y-%m-%d %H:%M").to_string();
    }
    match seconds {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{} min ago", seconds / 60),
        3_600..=86_399 => format!("{} h ago", seconds / 3_600),
        _ => format!("{} d ago", seconds / 86_400),
    }
}

pub fn relative_time_or(at: Option<DateTime<Utc>>, now: DateTime<Utc>, fallback: &str) -> String {
    at.map(|t| relative_time(t, now))
        .unwrap_or_else(|| fallback.to_string())
}

/// Compact metric value: 1234 -> "1.2k", 2500000 -> "2.5M".
pub fn compact_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// "a, b ,, c" -> ["a", "b", "c"]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_time_buckets() {
        assert_eq!(relative_time(now() - Duration::seconds(20), now()), "just now");
        assert_eq!(relative_time(now() - Duration::minutes(5), now()), "5 min ago");
        assert_eq!(relative_time(now() - Duration::hours(3), now()), "3 h ago");
        assert_eq!(relative_time(now() - Duration::days(2), now()), "2 d ago");
    }

    #[test]
    fn future_timestamps_render_absolute() {
        assert_eq!(
            relative_time(now() + Duration::hours(1), now()),
            "2026-03-10 13:00"
        );
    }

    #[test]
    fn missing_timestamp_uses_fallback() {
        assert_eq!(relative_time_or(None, now(), "never"), "never");
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(compact_number(42.0), "42");
        assert_eq!(compact_number(1234.0), "1.2k");
        assert_eq!(compact_number(2_500_000.0), "2.5M");
        assert_eq!(compact_number(0.5), "0.50");
    }

    #[test]
    fn split_list_drops_blanks() {
        assert_eq!(split_list("a, b ,, c "), vec!["a", "b", "c"]);
        assert!(split_list("  ").is_empty());
    }
}
