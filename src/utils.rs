//! Useful functions for converting OFX content.

use crate::{Decimal, Error, ErrorType};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};

fn invalid(kind: &str, text: &str) -> Error {
    Error {
        msg: format!("Invalid {}: {:?}.", kind, text),
        r#type: ErrorType::Invalid,
    }
}

/// Parses a [`Decimal`](crate::Decimal) from a [`&str`], ignoring
/// surrounding whitespace and a leading `+`.
pub fn parse_decimal(num_str: &str) -> Result<Decimal, Error> {
    let trimmed = num_str.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    digits
        .parse::<Decimal>()
        .map_err(|_| invalid("number", num_str))
}

/// Parses a GMT offset given in hours, such as `-5`, `+0` or `-3.5`.
fn parse_offset(hours: &str) -> Option<FixedOffset> {
    let hours = hours.trim();
    let (negative, digits) = match hours.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, hours.strip_prefix('+').unwrap_or(hours)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut seconds = whole.parse::<i32>().ok()?.checked_mul(3600)?;
    if !fraction.is_empty() {
        let fraction = format!("0.{}", fraction).parse::<f64>().ok()?;
        seconds = seconds.checked_add((fraction * 3600.0).round() as i32)?;
    }
    FixedOffset::east_opt(if negative { -seconds } else { seconds })
}

/// Parses an OFX date-time.
///
/// Accepted forms are `YYYYMMDD`, `YYYYMMDDHHMM`, `YYYYMMDDHHMMSS` and
/// `YYYYMMDDHHMMSS.XXX`, each optionally followed by a time zone such as
/// `[-5:EST]` or `[0]`. Without a time zone the time is in GMT.
pub fn parse_date(text: &str) -> Result<DateTime<FixedOffset>, Error> {
    let trimmed = text.trim();
    let (stamp, offset) = match trimmed.split_once('[') {
        Some((stamp, zone)) => {
            let zone = zone.strip_suffix(']').ok_or_else(|| invalid("date", text))?;
            let hours = zone.split_once(':').map_or(zone, |(hours, _)| hours);
            let offset = parse_offset(hours).ok_or_else(|| invalid("time zone", text))?;
            (stamp.trim_end(), offset)
        }
        None => (trimmed, FixedOffset::east_opt(0).ok_or_else(|| invalid("date", text))?),
    };
    let (main, fraction) = stamp.split_once('.').unwrap_or((stamp, ""));
    if !main.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("date", text));
    }

    let naive = match main.len() {
        8 if fraction.is_empty() => NaiveDate::parse_from_str(main, "%Y%m%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
        12 if fraction.is_empty() => NaiveDateTime::parse_from_str(main, "%Y%m%d%H%M").ok(),
        14 => NaiveDateTime::parse_from_str(main, "%Y%m%d%H%M%S").ok(),
        _ => None,
    }
    .ok_or_else(|| invalid("date", text))?;

    let naive = if fraction.is_empty() {
        naive
    } else {
        let digits: String = fraction.chars().take(9).collect();
        let nanos = format!("{:0<9}", digits)
            .parse::<u32>()
            .map_err(|_| invalid("date", text))?;
        naive
            .with_nanosecond(nanos)
            .ok_or_else(|| invalid("date", text))?
    };

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| invalid("date", text))
}
