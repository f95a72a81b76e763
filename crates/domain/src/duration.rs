use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// The largest magnitude a parsed duration suffix may have
const MAX_NANOS: u128 = i64::MAX as u128;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("No offset was given")]
    Empty,
    #[error("The day component `{0}` is not a whole number")]
    InvalidDays(String),
    #[error("Unable to parse `{0}` as a duration")]
    InvalidDuration(String),
    #[error("The offset `{0}` is too large")]
    OutOfRange(String),
}

/// Parses an offset like `5d3h30m` into the elapsed time it describes.
///
/// An optional `<int>d` prefix counts whole days, the rest is a short
/// duration string made of `<number><unit>` pairs where the unit is one of
/// `h`, `m`, `s`, `ms`, `us` or `ns`, e.g. `3h30m`, `1.5h` or `-10m`.
/// An empty remainder after the day prefix is a zero duration.
pub fn parse_offset(input: &str) -> Result<Duration, FormatError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FormatError::Empty);
    }

    let (days, suffix) = match input.split_once('d') {
        Some((days, suffix)) => {
            let days = days
                .parse::<i64>()
                .map_err(|_| FormatError::InvalidDays(days.to_string()))?;
            (days, suffix)
        }
        None => (0, input),
    };

    let days = Duration::try_days(days).ok_or_else(|| FormatError::OutOfRange(input.into()))?;
    let rest = if suffix.is_empty() {
        Duration::zero()
    } else {
        parse_short_duration(suffix)?
    };

    days.checked_add(&rest)
        .ok_or_else(|| FormatError::OutOfRange(input.into()))
}

/// Resolves an offset string into the instant it points at, counted from `now`
pub fn resolve_due_at(now: DateTime<Utc>, offset: &str) -> Result<DateTime<Utc>, FormatError> {
    let duration = parse_offset(offset)?;
    now.checked_add_signed(duration)
        .ok_or_else(|| FormatError::OutOfRange(offset.into()))
}

fn unit_in_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Splits off the leading run of ascii digits
fn take_digits(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}

fn parse_short_duration(input: &str) -> Result<Duration, FormatError> {
    let invalid = || FormatError::InvalidDuration(input.to_string());

    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = take_digits(rest);
        let (fraction, after_fraction) = match after_whole.strip_prefix('.') {
            Some(after_dot) => take_digits(after_dot),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_end = after_fraction
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(after_fraction.len());
        let (unit, remaining) = after_fraction.split_at(unit_end);
        let unit = unit_in_nanos(unit).ok_or_else(invalid)?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut amount = whole.checked_mul(unit).ok_or_else(invalid)?;

        if !fraction.is_empty() {
            // Digits beyond nanosecond precision never contribute
            let fraction = &fraction[..fraction.len().min(18)];
            let scale = 10u128.pow(fraction.len() as u32);
            let numerator: u128 = fraction.parse().map_err(|_| invalid())?;
            amount = amount
                .checked_add(numerator * unit / scale)
                .ok_or_else(invalid)?;
        }

        total = total.checked_add(amount).ok_or_else(invalid)?;
        if total > MAX_NANOS {
            return Err(FormatError::OutOfRange(input.to_string()));
        }
        rest = remaining;
    }

    let nanos = total as i64;
    Ok(Duration::nanoseconds(if negative { -nanos } else { nanos }))
}
