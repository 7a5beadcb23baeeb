//! Parsing of user-entered dates, times and durations.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Full weekday and month names, lowercase ("monday", ..., "december").
fn calendar_names() -> Vec<String> {
    // 2024-01-01 was a Monday
    let weekdays = (1..=7).filter_map(|d| NaiveDate::from_ymd_opt(2024, 1, d));
    let months = (1..=12).filter_map(|m| NaiveDate::from_ymd_opt(2024, m, 1));

    weekdays
        .map(|d| d.format("%A").to_string())
        .chain(months.map(|d| d.format("%B").to_string()))
        .map(|name| name.to_lowercase())
        .collect()
}

/// Expand abbreviated weekday and month names ("sat", "tues", "sept") that
/// fuzzydate doesn't handle. Any prefix of three or more letters counts.
fn expand_abbreviations(input: &str) -> String {
    let names = calendar_names();

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            names
                .iter()
                .find(|name| word.len() >= 3 && name.starts_with(word))
                .cloned()
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if the user's input string contains time-related tokens.
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    // am/pm right after a digit, optionally with one space: "6pm", "6 pm"
    let bytes = lower.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'a' || b == b'p') && bytes.get(i + 1) == Some(&b'm') {
            if i > 0 && bytes[i - 1].is_ascii_digit() {
                return true;
            }
            if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                return true;
            }
        }
    }

    // HH:MM
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':'
            && i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(|c| c.is_ascii_digit())
        {
            return true;
        }
    }

    // "at" followed by a digit, e.g. "at 3" or "friday at 15"
    let after_at = lower
        .find(" at ")
        .map(|pos| &lower[pos + 4..])
        .or_else(|| lower.strip_prefix("at "));
    after_at.is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Parse in `tz`, resolving "today", "tomorrow" and weekday names against
/// `now` as seen in that zone.
fn parse_in(input: &str, tz: &Tz, now: DateTime<Utc>) -> Result<DateTime<Tz>> {
    let expanded = expand_abbreviations(input);
    fuzzydate::aware_parse(expanded, Some(now.with_timezone(tz)), *tz)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))
}

/// Parse a day, ignoring any time of day in the input.
pub fn parse_date(input: &str, tz: &Tz, now: DateTime<Utc>) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    Ok(parse_in(input, tz, now)?.date_naive())
}

/// Parse a date and time of day, interpreted in `tz`.
pub fn parse_datetime(input: &str, tz: &Tz, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if !has_time_component(input) {
        anyhow::bail!("\"{}\" has no time of day (try e.g. \"{} 9am\")", input, input);
    }
    Ok(parse_in(input, tz, now)?.with_timezone(&Utc))
}

/// Parse an end input: a duration first (humantime), then a date/time.
pub fn parse_end(
    input: &str,
    start: DateTime<Utc>,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    if let Ok(end) = apply_duration(start, input) {
        return Ok(end);
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    parse_datetime(cleaned, tz, now)
}

pub fn apply_duration(start: DateTime<Utc>, dur_input: &str) -> Result<DateTime<Utc>> {
    let std_dur = humantime::parse_duration(dur_input)
        .with_context(|| format!("Could not parse duration: \"{}\"", dur_input))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;
    Ok(start + chrono_dur)
}
