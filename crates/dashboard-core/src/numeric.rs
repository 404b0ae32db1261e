//! Lenient numeric coercion for spreadsheet cells.
//!
//! Sheet cells arrive as raw strings such as `"7.5"`, `"85%"` or `""`. Every
//! metric treats them the way a browser's `parseFloat(x) || 0` would: the
//! longest leading decimal literal wins and anything unparseable is zero.

/// Coerce a raw cell value to `f64`.
///
/// Leading whitespace is skipped, then the longest prefix of the form
/// `[+-]digits[.digits][(e|E)[+-]digits]` (or `[+-]Infinity`) is parsed.
/// Returns `0.0` when there is no numeric prefix.
///
/// # Examples
///
/// ```
/// use dashboard_core::numeric::coerce_number;
///
/// assert_eq!(coerce_number("7.5"), 7.5);
/// assert_eq!(coerce_number(" 85%"), 85.0);
/// assert_eq!(coerce_number("12abc"), 12.0);
/// assert_eq!(coerce_number(""), 0.0);
/// assert_eq!(coerce_number("n/a"), 0.0);
/// ```
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i = 1;
    }

    if s[i..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < len && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows the marker.
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    let value = s[..i].parse::<f64>().unwrap_or(0.0);
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Coerce an optional cell (a missing column) the same way as [`coerce_number`].
pub fn coerce_optional(raw: Option<&str>) -> f64 {
    raw.map(coerce_number).unwrap_or(0.0)
}
