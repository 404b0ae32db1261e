/// Extra digits printed when probing whether a value sits exactly on a
/// rounding midpoint.
const TIE_PROBE_DIGITS: usize = 25;

/// Format `value` with exactly `decimals` fractional digits.
///
/// Rounding matches the dashboard's number display: the nearest decimal wins,
/// and values exactly half-way between two candidates round away from zero
/// (`2.5` becomes `"3"`, `15.25` becomes `"15.3"`). Non-finite values print as
/// `"Infinity"`, `"-Infinity"` and `"NaN"`.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_fixed;
///
/// assert_eq!(format_fixed(12.345, 1), "12.3");
/// assert_eq!(format_fixed(2.5, 0), "3");
/// assert_eq!(format_fixed(0.0, 1), "0.0");
/// assert_eq!(format_fixed(-1.25, 1), "-1.3");
/// ```
pub fn format_fixed(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let prec = decimals as usize;
    let magnitude = value.abs();

    // Binary floats that land exactly on a midpoint are dyadic, so their
    // decimal expansion terminates within the probe window.
    let probe = format!("{:.*}", prec + TIE_PROBE_DIGITS, magnitude);
    let tail = &probe[probe.len() - TIE_PROBE_DIGITS..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let body = if is_tie {
        let factor = 10_f64.powi(decimals as i32);
        format!("{:.*}", prec, (magnitude * factor).round() / factor)
    } else {
        format!("{:.*}", prec, magnitude)
    };

    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a percentage card value, e.g. `"82.5%"`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_fixed(value, 1))
}

/// Format an hours value, e.g. `"37.5h"`.
pub fn format_hours(value: f64) -> String {
    format!("{}h", format_fixed(value, 1))
}

/// Pad or truncate `text` to exactly `width` characters.
pub fn fit_width(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        if width == 0 {
            return String::new();
        }
        let mut out: String = text.chars().take(width - 1).collect();
        out.push('…');
        out
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}
