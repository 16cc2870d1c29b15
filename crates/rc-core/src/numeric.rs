use crate::RcError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RcError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, RcError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(RcError::Negative { what, value: v });
    }
    Ok(v)
}

/// Finite and `> 0`.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, RcError> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(RcError::NotPositive { what, value: v });
    }
    Ok(v)
}

/// `Some(v)` only for finite, strictly positive values.
pub fn positive_finite(v: Real) -> Option<Real> {
    (v.is_finite() && v > 0.0).then_some(v)
}

/// Parse a number out of free text the way form fields and display labels
/// are read: surrounding whitespace is ignored, a decimal comma is accepted,
/// and trailing text after the longest numeric prefix is dropped
/// (`"12,5 TR"` reads as 12.5).
///
/// Returns `None` for blank text or text without a numeric prefix.
pub fn parse_lenient(text: &str) -> Option<Real> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    let prefix = numeric_prefix(&normalized);
    // Longest prefix first; back off for inputs like "1e" or "3." + junk.
    (1..=prefix.len())
        .rev()
        .find_map(|end| prefix[..end].parse::<Real>().ok())
        .filter(|v| v.is_finite())
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_exp = false;
    while end < bytes.len() {
        let c = bytes[end];
        let ok = match c {
            b'0'..=b'9' => true,
            b'+' | b'-' => end == 0 || matches!(bytes[end - 1], b'e' | b'E'),
            b'.' if !seen_dot && !seen_exp => {
                seen_dot = true;
                true
            }
            b'e' | b'E' if !seen_exp && end > 0 => {
                seen_exp = true;
                true
            }
            _ => false,
        };
        if !ok {
            break;
        }
        end += 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("must be a finite number"));
    }

    #[test]
    fn range_guards() {
        assert_eq!(ensure_non_negative(0.0, "x"), Ok(0.0));
        assert!(matches!(
            ensure_non_negative(-1.0, "x"),
            Err(RcError::Negative { .. })
        ));
        assert_eq!(ensure_positive(2.0, "x"), Ok(2.0));
        assert!(matches!(
            ensure_positive(0.0, "x"),
            Err(RcError::NotPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(Real::NAN, "x"),
            Err(RcError::NonFinite { .. })
        ));
    }

    #[test]
    fn positive_finite_filters() {
        assert_eq!(positive_finite(2.5), Some(2.5));
        assert_eq!(positive_finite(0.0), None);
        assert_eq!(positive_finite(-1.0), None);
        assert_eq!(positive_finite(Real::INFINITY), None);
        assert_eq!(positive_finite(Real::NAN), None);
    }

    #[test]
    fn parse_lenient_plain_and_decorated() {
        assert_eq!(parse_lenient("9.3"), Some(9.3));
        assert_eq!(parse_lenient("  12.5 TR "), Some(12.5));
        assert_eq!(parse_lenient("7,5"), Some(7.5));
        assert_eq!(parse_lenient("-4"), Some(-4.0));
        assert_eq!(parse_lenient("1e3W"), Some(1000.0));
        assert_eq!(parse_lenient("3.kW"), Some(3.0));
        assert_eq!(parse_lenient("2e"), Some(2.0));
    }

    #[test]
    fn parse_lenient_rejects_blank_and_garbage() {
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("   "), None);
        assert_eq!(parse_lenient("N/A"), None);
        assert_eq!(parse_lenient("-"), None);
        assert_eq!(parse_lenient("."), None);
    }

    #[test]
    fn parse_lenient_zero_is_a_number() {
        assert_eq!(parse_lenient("0"), Some(0.0));
    }
}
