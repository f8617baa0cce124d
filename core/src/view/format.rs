//! Formatting helpers for rendered values

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Group digits with commas: `1234567` becomes `1,234,567`
pub fn format_number(number: u64) -> String {
    let digits = number.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounded percentage, `0%` when no score is available
pub fn format_match_score(score: f64) -> String {
    if score == 0.0 || !score.is_finite() {
        "0%".to_string()
    } else {
        format!("{}%", score.round() as i64)
    }
}

/// `Mar 5, 2024, 02:30 PM`; `N/A` when missing
pub fn format_date(value: Option<&str>) -> String {
    let value = match value {
        Some(value) if !value.trim().is_empty() => value.trim(),
        _ => return "N/A".to_string(),
    };

    match parse_timestamp(value) {
        Some(timestamp) => timestamp.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "Invalid Date".to_string(),
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_utc());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(timestamp);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Wall-clock time for "Last updated" labels
pub fn format_time_now() -> String {
    Local::now().format("%I:%M:%S %p").to_string()
}

/// Cut `text` to `max_len` characters, appending `...` when shortened
/// `None` for absent and empty values alike
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len).collect();
    out.push_str("...");
    out
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Capitalise the first letter
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1_000_000), "1,000,000");
        assert_eq!(format_number(12_345_678), "12,345,678");
    }

    #[test]
    fn test_format_match_score() {
        assert_eq!(format_match_score(0.0), "0%");
        assert_eq!(format_match_score(72.6), "73%");
        assert_eq!(format_match_score(f64::NAN), "0%");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(
            format_date(Some("2024-03-05T14:30:00")),
            "Mar 5, 2024, 02:30 PM"
        );
        assert_eq!(
            format_date(Some("2024-03-05T14:30:00.123456")),
            "Mar 5, 2024, 02:30 PM"
        );
        assert_eq!(format_date(Some("2024-12-25")), "Dec 25, 2024, 12:00 AM");
        assert_eq!(format_date(Some("yesterday")), "Invalid Date");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("error"), "Error");
        assert_eq!(capitalize(""), "");
    }
}
