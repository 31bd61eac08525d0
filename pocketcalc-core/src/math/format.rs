//! Result formatting
//!
//! Results are rounded to 12 decimals, snapped to the nearest integer when
//! within 1e-10, and rendered either as an integer or with at most 10
//! significant digits. Very large or very small magnitudes use exponent
//! form in the `%.10g` style (`1.5e+20`, `1e-07`).
//!
//! Unlike `%.10g`, a value of 1e10 or more that is still below 9e18 prints
//! as an integer: `12345678901.5` shows as `12345678900` rather than
//! `1.23456789e+10`, so the text fits an operand and reads back as typed.
//! Integers of 9e18 and above switch to exponent form instead of printing
//! every digit.

use core::fmt::Write;

use heapless::String;

/// Capacity of a formatted number or an operand being typed
pub const NUM_TEXT_LEN: usize = 24;

/// Text of one number
pub type NumText = String<NUM_TEXT_LEN>;

/// Decimal places kept before snapping
const ROUND_DECIMALS: i32 = 12;

/// Distance from an integer that counts as that integer
const SNAP_EPSILON: f64 = 1e-10;

/// Significant digits for non-integers
const SIGNIFICANT_DIGITS: usize = 10;

/// Integers below this magnitude are printed digit for digit
const INTEGER_LIMIT: f64 = 9.0e18;

/// Format a value for display
///
/// Returns `None` for NaN and infinities; callers show the error sentinel.
pub fn format_number(value: f64) -> Option<NumText> {
    if !value.is_finite() {
        return None;
    }

    let mut rounded = round_decimals(value, ROUND_DECIMALS);
    let nearest = libm::round(rounded);
    if libm::fabs(rounded - nearest) < SNAP_EPSILON {
        rounded = nearest;
    }

    let mut out = NumText::new();
    if is_printable_integer(rounded) {
        write!(out, "{}", rounded as i64).ok()?;
    } else {
        write_significant(&mut out, rounded)?;
    }
    Some(out)
}

fn is_printable_integer(value: f64) -> bool {
    value == libm::trunc(value) && libm::fabs(value) < INTEGER_LIMIT
}

fn round_decimals(value: f64, decimals: i32) -> f64 {
    let scale = libm::pow(10.0, decimals as f64);
    let scaled = value * scale;
    // Past 2^52 an f64 has no fractional bits left to round
    if !scaled.is_finite() || libm::fabs(scaled) >= 4.5e15 {
        return value;
    }
    libm::round(scaled) / scale
}

/// `%.10g`: fixed notation for decimal exponents in [-4, 9], else exponent form
fn write_significant(out: &mut NumText, value: f64) -> Option<()> {
    let mut sci: String<32> = String::new();
    write!(sci, "{:.*e}", SIGNIFICANT_DIGITS - 1, value).ok()?;
    let (mantissa, exponent) = sci.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;

    if exponent >= SIGNIFICANT_DIGITS as i32 {
        // Ten significant digits of a number this large is always an integer
        let whole: f64 = sci.parse().ok()?;
        if is_printable_integer(whole) {
            write!(out, "{}", whole as i64).ok()?;
            return Some(());
        }
    }

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        out.push_str(trim_fraction(mantissa)).ok()?;
        out.push('e').ok()?;
        out.push(if exponent < 0 { '-' } else { '+' }).ok()?;
        write!(out, "{:02}", exponent.unsigned_abs()).ok()?;
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        let mut fixed: String<40> = String::new();
        write!(fixed, "{:.*}", decimals, value).ok()?;
        out.push_str(trim_fraction(&fixed)).ok()?;
    }
    Some(())
}

/// Drop trailing zeros and a dangling point from a fractional rendering
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
