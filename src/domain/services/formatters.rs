#[cfg(test)]
#[path = "formatters_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;

pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_CURRENCY: &str = "USD";

const LINK_SCHEMES: [&str; 2] = ["http://", "https://"];
const LINK_CLOSERS: [char; 3] = [')', ']', '}'];
const LINK_TRAILING: [char; 6] = ['.', ',', '!', '?', ';', ':'];
const LINK_SEPARATORS: [char; 2] = [',', ';'];

fn parse_decimal(amount: &str) -> Option<f64> {
    let cleaned = amount.trim().replace(',', "");
    let parsed = cleaned.parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }

    return Some(parsed);
}

fn currency_prefix(currency_code: &str) -> String {
    match currency_code {
        "USD" => return "$".to_string(),
        "EUR" => return "€".to_string(),
        "GBP" => return "£".to_string(),
        "JPY" => return "¥".to_string(),
        "INR" => return "₹".to_string(),
        "CAD" => return "CA$".to_string(),
        "AUD" => return "A$".to_string(),
        code => return format!("{code} "),
    }
}

fn group_thousands(whole: u128) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    return grouped;
}

/// Formats an amount as en-US currency with between zero and two fractional
/// digits. Amounts that don't parse are handed back untouched.
pub fn format_currency(amount: &str, currency_code: &str) -> String {
    let trimmed = amount.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return "Price not available".to_string();
    }

    let value = match parse_decimal(trimmed) {
        Some(value) => value,
        None => return amount.to_string(),
    };

    let mut code = currency_code.trim().to_uppercase();
    if code.is_empty() || code == NOT_AVAILABLE {
        code = DEFAULT_CURRENCY.to_string();
    }

    let scaled = (value.abs() * 100.0).round();
    if scaled >= u128::MAX as f64 {
        return amount.to_string();
    }

    let cents = scaled as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut fraction_str = "".to_string();
    if fraction > 0 && fraction % 10 == 0 {
        fraction_str = format!(".{}", fraction / 10);
    } else if fraction > 0 {
        fraction_str = format!(".{fraction:02}");
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    return format!(
        "{sign}{prefix}{whole}{fraction_str}",
        prefix = currency_prefix(&code),
        whole = group_thousands(whole)
    );
}

fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    let trimmed = timestamp.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&parsed));
        }
    }

    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    return Err(anyhow!("Unrecognised timestamp {trimmed}"));
}

pub fn format_relative_timestamp(timestamp: &str) -> String {
    return format_relative_timestamp_at(timestamp, Local::now());
}

/// Same as `format_relative_timestamp`, measured against `now`. Absolute
/// dates are rendered in the time zone of `now`.
pub fn format_relative_timestamp_at<Tz: TimeZone>(timestamp: &str, now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if timestamp.trim().is_empty() {
        return "".to_string();
    }

    let parsed = match parse_timestamp(timestamp) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(error = ?err, "Failed to parse timestamp");
            return timestamp.to_string();
        }
    };

    let minutes = now
        .clone()
        .signed_duration_since(parsed)
        .num_seconds()
        .div_euclid(60);

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    if minutes < 1440 {
        return format!("{}h ago", minutes / 60);
    }

    return parsed
        .with_timezone(&now.timezone())
        .format("%b %-d, %I:%M %p")
        .to_string();
}

pub fn format_date(date: &str) -> String {
    if date.trim().is_empty() {
        return "".to_string();
    }

    match parse_timestamp(date) {
        Ok(parsed) => return parsed.format("%B %-d, %Y").to_string(),
        Err(_) => return date.to_string(),
    }
}

fn next_link_start(text: &str) -> Option<usize> {
    return LINK_SCHEMES
        .iter()
        .filter_map(|scheme| return text.find(scheme))
        .min();
}

/// Position of a `,` or `;` that glues a second URL onto the first.
fn joined_link_boundary(candidate: &str) -> Option<usize> {
    return candidate
        .char_indices()
        .find(|(idx, c)| {
            return LINK_SEPARATORS.contains(c)
                && LINK_SCHEMES
                    .iter()
                    .any(|scheme| return candidate[idx + 1..].starts_with(scheme));
        })
        .map(|(idx, _)| return idx);
}

/// Pulls every http(s) URL out of free text, in order of appearance and with
/// duplicates kept. A URL ends at whitespace, a closing bracket or a `,`/`;`
/// directly followed by another URL, and any trailing sentence punctuation is
/// dropped from it.
pub fn extract_links(text: &str) -> Vec<String> {
    let mut links: Vec<String> = vec![];
    let mut rest = text;

    while let Some(start) = next_link_start(rest) {
        let candidate = &rest[start..];
        let mut end = candidate
            .find(|c: char| return c.is_whitespace() || LINK_CLOSERS.contains(&c))
            .unwrap_or(candidate.len());
        if let Some(boundary) = joined_link_boundary(candidate) {
            end = end.min(boundary);
        }

        let url = candidate[..end].trim_end_matches(&LINK_TRAILING[..]);
        if !LINK_SCHEMES.contains(&url) {
            links.push(url.to_string());
        }

        rest = &candidate[end..];
    }

    return links;
}

pub fn format_property_type(property_type: &str) -> String {
    let trimmed = property_type.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return "Property type not specified".to_string();
    }

    let res = match trimmed.to_lowercase().as_str() {
        "residential" => "Residential",
        "commercial" => "Commercial",
        "industrial" => "Industrial",
        "land" => "Land",
        "mixed" => "Mixed Use",
        _ => return property_type.to_string(),
    };

    return res.to_string();
}

/// Shortens text to `max_length` characters followed by an ellipsis.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let truncated = text.chars().take(max_length).collect::<String>();
    return format!("{truncated}...");
}
