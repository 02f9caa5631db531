//! Target-day handling: parsing a requested date and turning it into the
//! UTC window that is fetched from the calendars.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{Error, Result};

/// Parse a date given as `DD/MM/YYYY` or `YYYY-MM-DD`.
pub fn parse_target_date(s: &str) -> Result<NaiveDate> {
  let s = s.trim();
  NaiveDate::parse_from_str(s, "%d/%m/%Y")
    .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
    .map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Parse an IANA time zone name such as `Asia/Tokyo`.
pub fn parse_time_zone(name: &str) -> Result<Tz> {
  name
    .parse::<Tz>()
    .map_err(|e| Error::InvalidTimeZone(format!("{name}: {e}")))
}

/// One local calendar day, expressed as a half-open UTC interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
  pub date:  NaiveDate,
  pub tz:    Tz,
  pub start: DateTime<Utc>,
  pub end:   DateTime<Utc>,
}

impl DayWindow {
  /// The window from local midnight on `date` to local midnight on the next
  /// day.
  pub fn for_date(date: NaiveDate, tz: Tz) -> Result<Self> {
    let next = date
      .succ_opt()
      .ok_or_else(|| Error::InvalidDate(date.to_string()))?;
    Ok(Self {
      date,
      tz,
      start: local_midnight(date, tz)?,
      end: local_midnight(next, tz)?,
    })
  }

  /// Today's window in `tz`.
  pub fn today(tz: Tz) -> Result<Self> {
    Self::for_date(Utc::now().with_timezone(&tz).date_naive(), tz)
  }

  /// Format an instant as `HH:MM` local time.
  pub fn time_of_day(&self, instant: DateTime<Utc>) -> String {
    instant.with_timezone(&self.tz).format("%H:%M").to_string()
  }
}

fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>> {
  let naive = date
    .and_hms_opt(0, 0, 0)
    .ok_or_else(|| Error::InvalidDate(date.to_string()))?;
  // Midnight can fall in a DST gap; take the earliest valid instant.
  tz.from_local_datetime(&naive)
    .earliest()
    .map(|dt| dt.with_timezone(&Utc))
    .ok_or_else(|| Error::InvalidDate(format!("{date} has no local midnight")))
}
