// malt-types - Exact numeric tokens
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arbitrary-precision numbers.
//!
//! A [`Number`] keeps the literal text it was created from together with an
//! exact decimal decomposition `mantissa * 10^exponent`. Nothing is ever
//! routed through `f64`, so `123456789012345678901234567890` keeps every
//! digit. The decomposition is normalised (trailing zeros moved into the
//! exponent), which makes `1`, `1.0`, `10e-1` and `0.1E1` compare equal.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Largest power of ten [`Number::to_bigint`] will expand.
const MAX_EXPANDED_EXPONENT: i64 = 1 << 16;

/// An exact integer or decimal number.
#[derive(Clone)]
pub struct Number {
    inner: Rc<NumberInner>,
}

struct NumberInner {
    /// Literal text as written
    text: Box<str>,
    /// Normalised digits (no trailing zeros unless zero)
    mantissa: BigInt,
    /// Power of ten applied to the mantissa
    exponent: i64,
}

impl Number {
    /// Parse a numeric literal using the JSON number grammar:
    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::Decode(format!("invalid numeric literal: {:?}", text));
        let bytes = text.as_bytes();
        let mut pos = 0;

        let negative = bytes.first() == Some(&b'-');
        if negative {
            pos += 1;
        }

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let int_digits = &text[int_start..pos];
        if int_digits.is_empty() || (int_digits.len() > 1 && int_digits.starts_with('0')) {
            return Err(invalid());
        }

        let mut frac_digits = "";
        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            let frac_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            frac_digits = &text[frac_start..pos];
            if frac_digits.is_empty() {
                return Err(invalid());
            }
        }

        let mut exponent: i64 = 0;
        if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
            pos += 1;
            let exp_start = pos;
            if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
                pos += 1;
            }
            let digits_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if digits_start == pos {
                return Err(invalid());
            }
            exponent = text[exp_start..pos].parse::<i64>().map_err(|_| {
                Error::Decode(format!("numeric exponent out of range: {:?}", text))
            })?;
        }

        if pos != bytes.len() {
            return Err(invalid());
        }

        let frac_len = i64::try_from(frac_digits.len()).map_err(|_| invalid())?;
        let exponent = exponent
            .checked_sub(frac_len)
            .ok_or_else(|| Error::Decode(format!("numeric exponent out of range: {:?}", text)))?;

        let mut digits = String::with_capacity(int_digits.len() + frac_digits.len() + 1);
        if negative {
            digits.push('-');
        }
        digits.push_str(int_digits);
        digits.push_str(frac_digits);

        let (mantissa, exponent) = decompose(&digits, exponent)
            .ok_or_else(|| Error::Decode(format!("numeric exponent out of range: {:?}", text)))?;

        Ok(Number {
            inner: Rc::new(NumberInner {
                text: text.into(),
                mantissa,
                exponent,
            }),
        })
    }

    /// The literal text this number was created from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner.text
    }

    /// True when the value has no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.inner.exponent >= 0
    }

    /// Exact integer value, if this number is an integer of manageable size.
    #[must_use]
    pub fn to_bigint(&self) -> Option<BigInt> {
        let exponent = self.inner.exponent;
        if !(0..=MAX_EXPANDED_EXPONENT).contains(&exponent) {
            return None;
        }
        let scale = num_traits::pow(BigInt::from(10), usize::try_from(exponent).ok()?);
        Some(&self.inner.mantissa * scale)
    }

    /// Exact `i64` value, if it is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.to_bigint()?.to_i64()
    }

    /// Nearest `f64`. Lossy; intended for hosts that need a float.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.inner.text.parse::<f64>().unwrap_or(f64::NAN)
    }
}

/// Split a signed decimal digit string into a mantissa with no trailing
/// zeros and the exponent those zeros add. Zero has exponent 0.
fn decompose(digits: &str, exponent: i64) -> Option<(BigInt, i64)> {
    let significant = digits.trim_end_matches('0');
    if significant.is_empty() || significant == "-" {
        return Some((BigInt::zero(), 0));
    }
    let shift = i64::try_from(digits.len() - significant.len()).ok()?;
    let mantissa = BigInt::from_str(significant).ok()?;
    Some((mantissa, exponent.checked_add(shift)?))
}

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Number::parse(s)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from(BigInt::from(n))
    }
}

impl From<BigInt> for Number {
    fn from(n: BigInt) -> Self {
        let text = n.to_string();
        let (mantissa, exponent) = decompose(&text, 0).unwrap_or_else(|| (n, 0));
        Number {
            inner: Rc::new(NumberInner {
                text: text.into(),
                mantissa,
                exponent,
            }),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.text)
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.text)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.exponent == other.inner.exponent
                && self.inner.mantissa == other.inner.mantissa)
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.mantissa.hash(state);
        self.inner.exponent.hash(state);
    }
}
