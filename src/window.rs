use anyhow::{Result, bail};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

/// First instant of the calendar month `months - 1` months before the month of `now`,
/// at local midnight. `months == 1` means "this month only".
pub fn window_start(now: DateTime<Local>, months: u32) -> DateTime<Local> {
  let back = months.saturating_sub(1) as i32;
  let total = (now.year() * 12 + now.month0() as i32) - back;
  let y = total.div_euclid(12);
  let m = total.rem_euclid(12) as u32 + 1;

  let midnight = NaiveDate::from_ymd_opt(y, m, 1)
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .unwrap_or(NaiveDateTime::MIN);

  // Midnight can fall into a DST gap; use the earliest valid reading of it.
  midnight
    .and_local_timezone(Local)
    .earliest()
    .unwrap_or_else(|| Local.from_utc_datetime(&midnight))
}

/// Parse a `--now-override` string into a local DateTime.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive local timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`.
pub fn parse_now_override(raw: &str) -> Result<DateTime<Local>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(dt.with_timezone(&Local));
  }

  let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
    .ok()
    .and_then(|ndt| ndt.and_local_timezone(Local).single());

  match parsed {
    Some(dt) => Ok(dt),
    None => bail!("invalid --now-override `{}`, expected RFC3339 or YYYY-MM-DDTHH:MM:SS", raw),
  }
}
