//! Pure formatting helpers used by the renderers.

/// Escape HTML-special characters in user-supplied text.
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

/// Escape text and keep its line breaks as `<br>`, for descriptions that
/// are inserted as raw HTML.
pub fn multiline_html(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

/// Trim a form value, mapping an empty result to `None`.
pub fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Absolute URLs pass through untouched; backend-relative paths get the
/// API origin prefixed.
pub fn resolve_image_url(url: &str, origin: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{origin}{url}")
    }
}

const RU_MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Long Russian date for an account-creation timestamp,
/// e.g. `"1 марта 2024 г."`. Accepts RFC 3339 or a bare
/// `YYYY-MM-DDTHH:MM:SS` as some backends omit the offset.
pub fn format_date_ru(timestamp: &str) -> Option<String> {
    use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

    let date: NaiveDate = DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .ok()?;

    let month = RU_MONTHS.get(date.month0() as usize)?;
    Some(format!("{} {} {} г.", date.day(), month, date.year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_neutralizes_script_tags() {
        let escaped = escape_html("<script>alert('x')</script>");
        assert_eq!(
            escaped,
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert!(!escaped.contains('<'));
    }

    #[test]
    fn test_multiline_html_keeps_line_breaks() {
        assert_eq!(multiline_html("a\nb & c"), "a<br>b &amp; c");
    }

    #[test]
    fn test_normalize_optional_nulls_whitespace() {
        assert_eq!(normalize_optional("   "), None);
        assert_eq!(normalize_optional(""), None);
        assert_eq!(normalize_optional("  rust  "), Some("rust".to_string()));
    }

    #[test]
    fn test_resolve_image_url() {
        let origin = "http://localhost:8000";
        assert_eq!(
            resolve_image_url("/uploads/a.png", origin),
            "http://localhost:8000/uploads/a.png"
        );
        assert_eq!(
            resolve_image_url("https://cdn.example.com/a.png", origin),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_format_date_ru() {
        assert_eq!(
            format_date_ru("2024-03-01T12:00:00Z"),
            Some("1 марта 2024 г.".to_string())
        );
        assert_eq!(
            format_date_ru("2023-12-31T23:59:59.123456"),
            Some("31 декабря 2023 г.".to_string())
        );
        assert_eq!(format_date_ru("не дата"), None);
    }
}
