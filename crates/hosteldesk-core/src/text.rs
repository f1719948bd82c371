// ── Text formatting helpers ──
//
// Pure string helpers shared by the view models and the rendering layer.
// `escape_markup` mirrors the escaping applied to untrusted guest text
// before it is stored alongside rendered content.

use chrono::{DateTime, NaiveDate, Utc};

/// Escapes `&`, `<`, and `>` so untrusted text can never be read as markup.
///
/// Only those three characters are rewritten; quotes and everything else
/// pass through unchanged.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Formats a rupee amount with thousands separators, e.g. `Rs. 15,000`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("Rs. {grouped}")
}

/// Formats a date as `Jan 5, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats a timestamp relative to `now`: `Just now`, `5 minutes ago`,
/// `3 hours ago`, `2 days ago`, or the full date once older than a week.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let days = elapsed.num_days();
    if days > 7 {
        return format_date(timestamp.date_naive());
    }
    if days > 0 {
        return format!("{days} day{} ago", plural(days));
    }
    let hours = elapsed.num_hours();
    if hours > 0 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    let minutes = elapsed.num_minutes();
    if minutes > 0 {
        return format!("{minutes} minute{} ago", plural(minutes));
    }
    "Just now".to_string()
}

fn plural(count: i64) -> &'static str {
    if count > 1 { "s" } else { "" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_markup_rewrites_only_the_three_markup_chars() {
        assert_eq!(
            escape_markup("<b>5 & 6</b> \"quoted\""),
            "&lt;b&gt;5 &amp; 6&lt;/b&gt; \"quoted\""
        );
        assert_eq!(escape_markup("plain text"), "plain text");
    }

    #[test]
    fn escape_markup_handles_empty_input() {
        assert_eq!(escape_markup(""), "");
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(0), "Rs. 0");
        assert_eq!(format_currency(950), "Rs. 950");
        assert_eq!(format_currency(15_000), "Rs. 15,000");
        assert_eq!(format_currency(1_234_567), "Rs. 1,234,567");
    }

    #[test]
    fn format_date_uses_short_month_and_unpadded_day() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2026");
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_date(date), "Dec 31, 2025");
    }

    #[test]
    fn relative_time_buckets_by_age() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();

        assert_eq!(format_relative_time(now, now), "Just now");
        assert_eq!(
            format_relative_time(now - Duration::seconds(59), now),
            "Just now"
        );
        assert_eq!(
            format_relative_time(now - Duration::minutes(1), now),
            "1 minute ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::minutes(45), now),
            "45 minutes ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::hours(3), now),
            "3 hours ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(2), now),
            "2 days ago"
        );
    }

    #[test]
    fn relative_time_falls_back_to_full_date_after_a_week() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let old = now - Duration::days(8);
        assert_eq!(format_relative_time(old, now), "Aug 17, 2026");
    }

    #[test]
    fn relative_time_treats_future_timestamps_as_just_now() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let future = now + Duration::hours(2);
        assert_eq!(format_relative_time(future, now), "Just now");
    }
}
