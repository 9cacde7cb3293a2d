use std::time::Duration;

use super::ReportError;

const UNITS: [(&str, u128); 6] = [
    ("ns", 1),
    ("µs", 1_000),
    ("μs", 1_000),
    ("us", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
];

/// Renders like `63.334µs`, `125ns` or `1.5ms`.
pub fn format_duration(d: Duration) -> String {
    format!("{:?}", d)
}

/// Inverse of [`format_duration`]. Values finer than a nanosecond are rounded
/// to the nearest nanosecond.
pub fn parse_duration(s: &str) -> Result<Duration, ReportError> {
    let invalid = || ReportError::InvalidDuration(s.to_owned());
    let s_trim = s.trim();
    let (number, scale) = UNITS
        .iter()
        .find_map(|&(suffix, scale)| s_trim.strip_suffix(suffix).map(|n| (n, scale)))
        .ok_or_else(invalid)?;

    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    let is_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !is_digits(int_part) || !is_digits(frac_part) || number.ends_with('.') {
        return Err(invalid());
    }

    let int: u128 = int_part.parse().map_err(|_| invalid())?;
    let frac_digits = frac_part.len().min(20) as u32;
    let frac: u128 = if frac_part.is_empty() {0} else {frac_part[..frac_digits as usize].parse().map_err(|_| invalid())?};
    let denom = 10u128.pow(frac_digits);
    let nanos = int
        .checked_mul(scale)
        .and_then(|whole| whole.checked_add((frac * scale + denom / 2) / denom))
        .ok_or_else(invalid)?;

    u64::try_from(nanos).map(Duration::from_nanos).map_err(|_| invalid())
}
