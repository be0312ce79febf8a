use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};

const COMMON_DATE_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S",    // Common format without timezone
  "%Y-%m-%d %H:%M:%S %z", // Common format with timezone
  "%Y-%m-%dT%H:%M:%S",    // ISO without timezone
];

const DISPLAY_FORMAT: &str = "%b %d, %Y";

pub fn parse_date(date_str: impl AsRef<str>) -> Option<DateTime<FixedOffset>> {
  let date_str = date_str.as_ref().trim();
  if date_str.is_empty() {
    return None;
  }

  if let Ok(parsed) = DateTime::parse_from_rfc2822(date_str) {
    return Some(parsed);
  }

  // feeds in the wild often carry a weekday that does not match the date
  if let Some(rest) = strip_weekday(date_str) {
    if let Ok(parsed) = DateTime::parse_from_rfc2822(rest) {
      return Some(parsed);
    }
  }

  if let Ok(parsed) = DateTime::parse_from_rfc3339(date_str) {
    return Some(parsed);
  }

  for fmt in COMMON_DATE_FORMATS {
    if let Ok(parsed) = DateTime::parse_from_str(date_str, fmt) {
      return Some(parsed);
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(date_str, fmt) {
      return Some(assume_local(parsed));
    }
  }

  // date only
  if let Ok(parsed) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
    return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
  }

  None
}

fn strip_weekday(date_str: &str) -> Option<&str> {
  let (weekday, rest) = date_str.split_once(',')?;
  let weekday = weekday.trim();
  let is_name = !weekday.is_empty()
    && weekday.chars().all(|c| c.is_ascii_alphabetic());
  is_name.then(|| rest.trim_start())
}

// try local time, fallback to UTC
fn assume_local(parsed: NaiveDateTime) -> DateTime<FixedOffset> {
  parsed
    .and_local_timezone(Local)
    .earliest()
    .map(|date| date.fixed_offset())
    .unwrap_or_else(|| parsed.and_utc().fixed_offset())
}

/// Formats a feed timestamp as `Mon DD, YYYY`. Unparseable input yields
/// an empty string, never the raw timestamp.
pub fn format_date(date_str: &str) -> String {
  match parse_date(date_str) {
    Some(date) => date.format(DISPLAY_FORMAT).to_string(),
    None => String::new(),
  }
}
