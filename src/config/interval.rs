//! Timespec parsing for administrative interval arguments.
//!
//! Grammar: one or more `<digits>[unit]` groups, summed. Units are
//! `s`, `m`, `h`, `d`, `w`; a trailing group without a unit is seconds.
//! `"10m5"` is ten minutes and five seconds, `"1h30m"` is ninety minutes.

use std::time::Duration;

use crate::core::ConfigError;

fn unit_secs(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(60 * 60),
        'd' => Some(24 * 60 * 60),
        'w' => Some(7 * 24 * 60 * 60),
        _ => None,
    }
}

/// Parse a timespec such as `"15m"` or `"1h30m"`.
///
/// # Errors
///
/// Returns `ConfigError::Parse` on empty input, unknown characters, a unit
/// with no preceding digits, or overflow.
pub fn parse_interval(raw: &str) -> Result<Duration, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Parse("empty timespec".into()));
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for chr in raw.chars() {
        if chr.is_ascii_digit() {
            digits.push(chr);
            continue;
        }

        let Some(unit) = unit_secs(chr) else {
            return Err(ConfigError::Parse(format!(
                "`{chr}` is not a digit or time unit"
            )));
        };
        if digits.is_empty() {
            return Err(ConfigError::Parse(format!("unit `{chr}` has no value")));
        }
        total = add_group(total, &digits, unit)?;
        digits.clear();
    }

    if !digits.is_empty() {
        total = add_group(total, &digits, 1)?;
    }

    Ok(Duration::from_secs(total))
}

fn add_group(total: u64, digits: &str, unit: u64) -> Result<u64, ConfigError> {
    let overflow = || ConfigError::Parse("timespec too large".into());
    let value: u64 = digits.parse().map_err(|_| overflow())?;
    value
        .checked_mul(unit)
        .and_then(|secs| total.checked_add(secs))
        .ok_or_else(overflow)
}
