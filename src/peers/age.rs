//! Compact age expressions such as `90s`, `30m`, `2h`, `1d`.

use std::time::Duration;

/// Parse `<digits><unit>` where unit is one of `s`, `m`, `h`, `d`.
///
/// No sign, no fraction, no whitespace and nothing after the unit. Weeks and
/// months are not accepted. Returns `None` on any mismatch or on overflow;
/// callers treat that as bad user input.
pub fn parse_age_spec(spec: &str) -> Option<Duration> {
    let unit = spec.chars().last()?;
    let digits = &spec[..spec.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = digits.parse().ok()?;
    let scale: u64 = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };
    value.checked_mul(scale).map(Duration::from_secs)
}
