//! Timing token normalization
//!
//! Live-timing tables show lap times as `m:ss.sss` and gaps or intervals as
//! plain seconds. Anything else ("1 LAP", "PIT", blanks) is treated as absent.

/// Parse a timing token into seconds.
///
/// - `"1:23.456"` is minutes and seconds, giving `83.456`
/// - `"45.2"` is plain seconds
/// - blanks, non-numeric text, more than one `:` and non-finite values are `None`
///
/// Never fails loudly; callers drop rows whose mandatory fields are `None`.
pub fn parse_time(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let mut parts = token.split(':');
    let seconds = match (parts.next(), parts.next(), parts.next()) {
        (Some(minutes), Some(seconds), None) => {
            let minutes: i64 = minutes.trim().parse().ok()?;
            let seconds: f64 = seconds.trim().parse().ok()?;
            60.0 * minutes as f64 + seconds
        }
        (Some(plain), None, _) => plain.parse().ok()?,
        _ => return None,
    };

    seconds.is_finite().then_some(seconds)
}

/// Coerce an integer cell such as a lap number or position.
///
/// Accepts integral float text (`"12.0"`) the way a numeric column coercion would.
pub fn parse_count(token: &str) -> Option<u32> {
    let token = token.trim();
    if let Ok(value) = token.parse::<u32>() {
        return Some(value);
    }

    let value: f64 = token.parse().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
