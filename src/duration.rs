/*
 * duration.rs
 *
 * Parse "30s", "5m", "1.5h", "0.5d". No suffix means seconds.
 * Suffixes are lowercase only, matching the reference tool.
 * Cap at i32::MAX seconds so downstream arithmetic can't overflow.
 *
 * Zero is a real deadline, not "run forever": a zero-second wait simply
 * expires on the first clock check.
 */

use std::time::Duration;

use crate::error::{Result, TimeoutError};

/* anything past this is rejected as overflow */
const MAX_SECONDS: f64 = i32::MAX as f64;

/// Parse "30", "30s", "1.5m", "2h", "0.5d". No suffix = seconds.
///
/// # Examples
///
/// ```
/// use timelimit::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("1.5m").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
/// assert_eq!(parse_duration("0.5d").unwrap(), Duration::from_secs(43200));
/// assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
/// ```
pub fn parse_duration(input: &str) -> Result<Duration> {
    let input = input.trim();

    if input.is_empty() {
        return Err(TimeoutError::InvalidDuration("empty duration".to_string()));
    }

    let (num_str, suffix) = split_number_and_suffix(input);

    if num_str.is_empty() {
        return Err(TimeoutError::InvalidDuration(format!(
            "no numeric value in '{input}'"
        )));
    }

    let value: f64 = num_str
        .parse()
        .map_err(|_| TimeoutError::InvalidDuration(format!("invalid number '{num_str}'")))?;

    if value < 0.0 {
        return Err(TimeoutError::NegativeDuration);
    }

    if value.is_nan() {
        return Err(TimeoutError::InvalidDuration(
            "NaN is not allowed".to_string(),
        ));
    }
    if value.is_infinite() {
        return Err(TimeoutError::DurationOverflow);
    }

    let multiplier = match suffix {
        "" | "s" => 1.0,
        "m" => 60.0,
        "h" => 3600.0,
        "d" => 86400.0,
        _ => {
            return Err(TimeoutError::InvalidDuration(format!(
                "invalid suffix '{suffix}'"
            )));
        }
    };

    let total_seconds = value * multiplier;

    if total_seconds > MAX_SECONDS {
        return Err(TimeoutError::DurationOverflow);
    }

    Ok(Duration::from_secs_f64(total_seconds))
}

/* find where the number ends and suffix begins */
fn split_number_and_suffix(input: &str) -> (&str, &str) {
    let suffix_start = input
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map_or(0, |(i, c)| i + c.len_utf8());

    (&input[..suffix_start], &input[suffix_start..])
}
