// SPDX-License-Identifier: MIT
//
// CSS numeric tokens — parse-with-fallback for untyped style reads.
//
// Computed styles hand back strings for numeric concepts: "12px", "auto",
// "0.5turn", "3". Every consumer in the workspace (color functions, z-index,
// border radius) goes through these helpers so that "what counts as a
// number" is decided in exactly one place.
//
// The rules mirror how browsers' lenient number readers behave: skip leading
// whitespace, take the longest numeric prefix, ignore whatever unit follows.
// Anything without a leading number is "no value", never an error.

// ─── Prefix Parsers ──────────────────────────────────────────────────────────

/// Parse the longest leading decimal number of `s`.
///
/// Accepts an optional sign, an integer part, a fractional part, and an
/// exponent. Trailing text (units, keywords) is ignored.
///
/// ```
/// use fr_color::css::parse_float_prefix;
///
/// assert_eq!(parse_float_prefix("12.5px"), Some(12.5));
/// assert_eq!(parse_float_prefix("  -.5turn"), Some(-0.5));
/// assert_eq!(parse_float_prefix("auto"), None);
/// ```
#[must_use]
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = float_prefix_len(s.as_bytes())?;
    s[..end].parse().ok()
}

/// Parse the leading integer of `s` (optional sign, then digits).
///
/// A fractional part terminates the number, so `"0.5px"` reads as `0`.
///
/// ```
/// use fr_color::css::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix("8px"), Some(8));
/// assert_eq!(parse_int_prefix("-3"), Some(-3));
/// assert_eq!(parse_int_prefix("auto"), None);
/// ```
#[must_use]
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// [`parse_int_prefix`] with a fallback for unparsable input.
#[inline]
#[must_use]
pub fn int_or(s: &str, default: i64) -> i64 {
    parse_int_prefix(s).unwrap_or(default)
}

// ─── Scanning ────────────────────────────────────────────────────────────────

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Byte length of the numeric prefix, or `None` if there are no digits.
fn float_prefix_len(bytes: &[u8]) -> Option<usize> {
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow: "1em" is 1 with unit "em".
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            end = j + exp_digits;
        }
    }

    Some(end)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Floats ───────────────────────────────────────────────────────────

    #[test]
    fn float_plain_and_units() {
        assert_eq!(parse_float_prefix("42"), Some(42.0));
        assert_eq!(parse_float_prefix("4.25px"), Some(4.25));
        assert_eq!(parse_float_prefix("50%"), Some(50.0));
        assert_eq!(parse_float_prefix("0.25turn"), Some(0.25));
    }

    #[test]
    fn float_signs_and_leading_dot() {
        assert_eq!(parse_float_prefix("-12"), Some(-12.0));
        assert_eq!(parse_float_prefix("+7.5"), Some(7.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("-.5"), Some(-0.5));
    }

    #[test]
    fn float_trailing_dot_is_dropped() {
        assert_eq!(parse_float_prefix("5.px"), Some(5.0));
    }

    #[test]
    fn float_exponent_requires_digits() {
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("2E-1"), Some(0.2));
        assert_eq!(parse_float_prefix("1em"), Some(1.0));
        assert_eq!(parse_float_prefix("3e"), Some(3.0));
    }

    #[test]
    fn float_leading_whitespace() {
        assert_eq!(parse_float_prefix("   9deg"), Some(9.0));
    }

    #[test]
    fn float_rejects_non_numbers() {
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("auto"), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("px12"), None);
    }

    // ── Integers ─────────────────────────────────────────────────────────

    #[test]
    fn int_reads_prefix() {
        assert_eq!(parse_int_prefix("10"), Some(10));
        assert_eq!(parse_int_prefix("8px"), Some(8));
        assert_eq!(parse_int_prefix("0.5px"), Some(0));
        assert_eq!(parse_int_prefix(" -4"), Some(-4));
    }

    #[test]
    fn int_rejects_non_numbers() {
        assert_eq!(parse_int_prefix("auto"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("+"), None);
        assert_eq!(parse_int_prefix(".5"), None);
    }

    #[test]
    fn int_overflow_is_unparsable() {
        assert_eq!(parse_int_prefix("99999999999999999999999"), None);
    }

    // ── Fallbacks ────────────────────────────────────────────────────────

    #[test]
    fn fallbacks_apply_only_on_failure() {
        assert_eq!(int_or("auto", 0), 0);
        assert_eq!(int_or("3", 0), 3);
        assert_eq!(int_or("-2px", 0), -2);
    }
}
