//! Numeric values and the coercion policy applied when documents are parsed
//!
//! Numbers keep the variant chosen at parse time so typed getters and
//! matchers can tell an `Integer` from a `Long` or a `Float`, while still
//! comparing and combining across variants.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
use num_bigint::Sign;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

/// How decimal and integral JSON numbers are represented after parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NumberReturnType {
    /// Decimals become `Float` when they fit in `f32`, otherwise `Double`
    #[default]
    FloatAndDouble,
    /// Decimals become exact `BigDecimal`
    BigDecimal,
    /// Decimals become `Double`
    Double,
    /// Integers always become `BigInteger`
    BigInteger,
}

impl NumberReturnType {
    #[inline]
    #[must_use]
    pub fn is_float_or_double(self) -> bool {
        matches!(self, Self::FloatAndDouble | Self::Double)
    }
}

/// Decimals whose exponent exceeds this stay approximate: exact forms would need
/// that many digits to print or compare.
const MAX_EXACT_EXPONENT: i64 = 4096;

/// Parse decimal text such as `12.10`, `-0.5` or `1.5e3`, keeping the written scale
///
/// ```
/// use restcheck_client::value::number::{parse_decimal, plain_decimal};
///
/// let price = parse_decimal("1234567890123456789012345678901234567890.25").expect("exact");
/// assert_eq!(plain_decimal(&price), "1234567890123456789012345678901234567890.25");
/// assert_eq!(plain_decimal(&parse_decimal("1.5e3").expect("exponent")), "1500");
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<BigDecimal> {
    let text = text.trim();
    if let Some(pos) = text.find(['e', 'E']) {
        let exponent = text[pos + 1..].parse::<i64>().ok()?;
        if exponent.unsigned_abs() > MAX_EXACT_EXPONENT.unsigned_abs() {
            return None;
        }
    }
    let decimal = BigDecimal::from_str(text).ok()?;
    let (_, scale) = decimal.as_bigint_and_exponent();
    (scale.unsigned_abs() <= MAX_EXACT_EXPONENT.unsigned_abs()).then_some(decimal)
}

/// Plain notation with the scale kept: `12.10`, `-0.05`, `1500`
#[must_use]
pub fn plain_decimal(decimal: &BigDecimal) -> String {
    let (unscaled, scale) = decimal.as_bigint_and_exponent();
    let sign = if unscaled.sign() == Sign::Minus { "-" } else { "" };
    let digits = unscaled.magnitude().to_string();
    let Ok(shift) = usize::try_from(scale.unsigned_abs()) else {
        return format!("{sign}{digits}E{}", -scale);
    };
    if scale <= 0 {
        if digits == "0" {
            return digits;
        }
        return format!("{sign}{digits}{}", "0".repeat(shift));
    }
    if digits.len() > shift {
        let (int_part, frac_part) = digits.split_at(digits.len() - shift);
        format!("{sign}{int_part}.{frac_part}")
    } else {
        format!("{sign}0.{}{digits}", "0".repeat(shift - digits.len()))
    }
}

/// Integral part, rounding toward zero
fn truncate(decimal: &BigDecimal) -> BigInt {
    decimal.with_scale(0).into_bigint_and_exponent().0
}

/// Low 64 bits in two's complement, the way a narrowing cast keeps them
fn low_bits(value: &BigInt) -> i64 {
    let fill = if value.sign() == Sign::Minus { 0xff } else { 0 };
    let mut bytes = [fill; 8];
    for (slot, byte) in bytes.iter_mut().zip(value.to_signed_bytes_le()) {
        *slot = byte;
    }
    i64::from_le_bytes(bytes)
}

/// A parsed number in the representation chosen by [`NumberReturnType`]
#[derive(Debug, Clone)]
pub enum Number {
    Integer(i32),
    Long(i64),
    BigInteger(BigInt),
    Float(f32),
    Double(f64),
    BigDecimal(BigDecimal),
}

impl Number {
    /// Smallest integral variant that holds `value`
    #[must_use]
    pub fn integral(value: BigInt) -> Self {
        if let Some(v) = value.to_i32() {
            Number::Integer(v)
        } else if let Some(v) = value.to_i64() {
            Number::Long(v)
        } else {
            Number::BigInteger(value)
        }
    }

    /// Parse number text from a document under the given policy
    ///
    /// Text without a fraction or exponent is integral and never loses digits.
    #[must_use]
    pub fn parse(text: &str, return_type: NumberReturnType) -> Option<Self> {
        let text = text.trim();
        let is_integral = !text.contains(['.', 'e', 'E']);

        if is_integral {
            let value = BigInt::from_str(text).ok()?;
            return Some(if return_type == NumberReturnType::BigInteger {
                Number::BigInteger(value)
            } else {
                Number::integral(value)
            });
        }

        match return_type {
            NumberReturnType::BigDecimal => parse_decimal(text)
                .map(Number::BigDecimal)
                .or_else(|| text.parse::<f64>().ok().map(Number::Double)),
            NumberReturnType::Double => text.parse::<f64>().ok().map(Number::Double),
            NumberReturnType::FloatAndDouble | NumberReturnType::BigInteger => {
                let value = text.parse::<f64>().ok()?;
                if value.is_finite() && value.abs() <= f64::from(f32::MAX) {
                    #[allow(clippy::cast_possible_truncation)]
                    Some(Number::Float(value as f32))
                } else {
                    Some(Number::Double(value))
                }
            }
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Number::Integer(_) => "Integer",
            Number::Long(_) => "Long",
            Number::BigInteger(_) => "BigInteger",
            Number::Float(_) => "Float",
            Number::Double(_) => "Double",
            Number::BigDecimal(_) => "BigDecimal",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_integral(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::Long(_) | Number::BigInteger(_))
    }

    #[inline]
    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self, Number::Float(_) | Number::Double(_))
    }

    /// Exact integral value for integral variants
    #[must_use]
    pub fn as_big_int(&self) -> Option<BigInt> {
        match self {
            Number::Integer(v) => Some(BigInt::from(*v)),
            Number::Long(v) => Some(BigInt::from(*v)),
            Number::BigInteger(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Exact decimal value for integral and decimal variants
    #[must_use]
    pub fn as_big_decimal(&self) -> Option<BigDecimal> {
        match self {
            Number::BigDecimal(v) => Some(v.clone()),
            _ => self.as_big_int().map(|v| BigDecimal::new(v, 0)),
        }
    }

    /// Integral part of any variant, rounding toward zero; non-finite floats give zero
    #[must_use]
    pub fn truncated(&self) -> BigInt {
        match self {
            Number::BigDecimal(v) => truncate(v),
            Number::Float(v) => BigInt::from_f32(v.trunc()).unwrap_or_default(),
            Number::Double(v) => BigInt::from_f64(v.trunc()).unwrap_or_default(),
            other => other.as_big_int().unwrap_or_default(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(v) => f64::from(*v),
            Number::Long(v) => *v as f64,
            Number::BigInteger(v) => v.to_f64().unwrap_or(f64::NAN),
            Number::Float(v) => f64::from(*v),
            Number::Double(v) => *v,
            Number::BigDecimal(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Narrowing conversion with cast semantics: fractions are dropped and
    /// wide integers keep their low bits.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn to_i64_lossy(&self) -> i64 {
        match self {
            Number::Integer(v) => i64::from(*v),
            Number::Long(v) => *v,
            Number::BigInteger(v) => low_bits(v),
            Number::Float(v) => *v as i64,
            Number::Double(v) => *v as i64,
            Number::BigDecimal(v) => {
                // 10^64 is a multiple of 2^64, so the low bits of larger magnitudes are zero
                if v.as_bigint_and_exponent().1 <= -64 {
                    0
                } else {
                    low_bits(&truncate(v))
                }
            }
        }
    }

    /// Compare across variants. A `Float` operand compares in `f32` precision.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        if let (Some(left), Some(right)) = (self.as_big_int(), other.as_big_int()) {
            return Some(left.cmp(&right));
        }
        if let (Some(left), Some(right)) = (self.as_big_decimal(), other.as_big_decimal()) {
            return Some(left.cmp(&right));
        }
        if matches!(self, Number::Float(_)) || matches!(other, Number::Float(_)) {
            return (self.as_f64() as f32).partial_cmp(&(other.as_f64() as f32));
        }
        self.as_f64().partial_cmp(&other.as_f64())
    }

    fn both_float(&self, other: &Number) -> bool {
        matches!((self, other), (Number::Float(_), Number::Float(_)))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn floating(&self, other: &Number, value: f64) -> Number {
        if self.both_float(other) {
            Number::Float(value as f32)
        } else {
            Number::Double(value)
        }
    }

    /// Exact operands when neither side is floating
    fn exact(&self, other: &Number) -> Option<(BigDecimal, BigDecimal)> {
        if self.is_floating() || other.is_floating() {
            return None;
        }
        Some((self.as_big_decimal()?, other.as_big_decimal()?))
    }

    #[must_use]
    pub fn checked_add(&self, other: &Number) -> Option<Number> {
        if let (Some(left), Some(right)) = (self.as_big_int(), other.as_big_int()) {
            return Some(Number::integral(left + right));
        }
        if let Some((left, right)) = self.exact(other) {
            return Some(Number::BigDecimal(left + right));
        }
        Some(self.floating(other, self.as_f64() + other.as_f64()))
    }

    #[must_use]
    pub fn checked_sub(&self, other: &Number) -> Option<Number> {
        if let (Some(left), Some(right)) = (self.as_big_int(), other.as_big_int()) {
            return Some(Number::integral(left - right));
        }
        if let Some((left, right)) = self.exact(other) {
            return Some(Number::BigDecimal(left - right));
        }
        Some(self.floating(other, self.as_f64() - other.as_f64()))
    }

    #[must_use]
    pub fn checked_mul(&self, other: &Number) -> Option<Number> {
        if let (Some(left), Some(right)) = (self.as_big_int(), other.as_big_int()) {
            return Some(Number::integral(left * right));
        }
        if let Some((left, right)) = self.exact(other) {
            return Some(Number::BigDecimal(left * right));
        }
        Some(self.floating(other, self.as_f64() * other.as_f64()))
    }

    /// Division; `None` on division by zero. Inexact integral division yields `Double`.
    #[must_use]
    pub fn checked_div(&self, other: &Number) -> Option<Number> {
        if let (Some(left), Some(right)) = (self.as_big_int(), other.as_big_int()) {
            if right.is_zero() {
                return None;
            }
            if (&left % &right).is_zero() {
                return Some(Number::integral(left / right));
            }
        }
        let divisor = other.as_f64();
        if divisor == 0.0 {
            return None;
        }
        Some(self.floating(other, self.as_f64() / divisor))
    }

    #[must_use]
    pub fn checked_rem(&self, other: &Number) -> Option<Number> {
        if let (Some(left), Some(right)) = (self.as_big_int(), other.as_big_int()) {
            if right.is_zero() {
                return None;
            }
            return Some(Number::integral(left % right));
        }
        let divisor = other.as_f64();
        if divisor == 0.0 {
            return None;
        }
        Some(self.floating(other, self.as_f64() % divisor))
    }

    #[must_use]
    pub fn negate(&self) -> Number {
        match self {
            Number::Integer(v) => v.checked_neg().map_or(Number::Long(-i64::from(*v)), Number::Integer),
            Number::Long(v) => v
                .checked_neg()
                .map_or_else(|| Number::BigInteger(-BigInt::from(*v)), Number::Long),
            Number::BigInteger(v) => Number::BigInteger(-v.clone()),
            Number::Float(v) => Number::Float(-v),
            Number::Double(v) => Number::Double(-v),
            Number::BigDecimal(v) => Number::BigDecimal(-v.clone()),
        }
    }

    #[must_use]
    pub fn abs(&self) -> Number {
        if self.compare(&Number::Integer(0)) == Some(Ordering::Less) {
            self.negate()
        } else {
            self.clone()
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

fn write_floating(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(v) => write!(f, "{v}"),
            Number::Long(v) => write!(f, "{v}"),
            Number::BigInteger(v) => write!(f, "{v}"),
            Number::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e7 {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Number::Double(v) => write_floating(f, *v),
            Number::BigDecimal(v) => f.write_str(&plain_decimal(v)),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::integral(BigInt::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::integral(BigInt::from(value))
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number::integral(BigInt::from(value))
    }
}

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        Number::integral(BigInt::from(value))
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::integral(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Double(value)
    }
}

impl From<BigDecimal> for Number {
    fn from(value: BigDecimal) -> Self {
        Number::BigDecimal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_text_picks_smallest_variant() {
        assert!(matches!(
            Number::parse("15303030", NumberReturnType::FloatAndDouble),
            Some(Number::Integer(15_303_030))
        ));
        assert!(matches!(
            Number::parse("13000000000", NumberReturnType::FloatAndDouble),
            Some(Number::Long(13_000_000_000))
        ));
        assert!(matches!(
            Number::parse("13000000000", NumberReturnType::BigInteger),
            Some(Number::BigInteger(ref v)) if *v == BigInt::from(13_000_000_000_i64)
        ));
    }

    #[test]
    fn integers_wider_than_i128_stay_exact() {
        let text = "1234567890123456789012345678901234567890123";
        let value = Number::parse(text, NumberReturnType::FloatAndDouble).expect("integer parses");
        assert!(matches!(value, Number::BigInteger(_)));
        assert_eq!(value.to_string(), text);
    }

    #[test]
    fn decimal_policy() {
        assert!(matches!(
            Number::parse("12.1", NumberReturnType::FloatAndDouble),
            Some(Number::Float(v)) if v == 12.1_f32
        ));
        assert!(matches!(
            Number::parse("1e300", NumberReturnType::FloatAndDouble),
            Some(Number::Double(_))
        ));
        assert!(matches!(
            Number::parse("12.1", NumberReturnType::Double),
            Some(Number::Double(v)) if v == 12.1
        ));
        let exact = Number::parse("12.10", NumberReturnType::BigDecimal).expect("decimal parses");
        assert_eq!(exact.to_string(), "12.10");
    }

    #[test]
    fn decimals_keep_every_digit() {
        let text = "1234567890123456789012345678901234567890.25";
        let exact = Number::parse(text, NumberReturnType::BigDecimal).expect("decimal parses");
        assert!(matches!(exact, Number::BigDecimal(_)));
        assert_eq!(exact.to_string(), text);
    }

    #[test]
    fn plain_notation_keeps_scale() {
        let value = parse_decimal("-0.05").expect("valid decimal");
        assert_eq!(value.as_bigint_and_exponent(), (BigInt::from(-5), 2));
        assert_eq!(plain_decimal(&value), "-0.05");
        assert_eq!(plain_decimal(&parse_decimal("1.5e3").expect("valid exponent")), "1500");
        assert!(parse_decimal("abc").is_none());
        assert!(parse_decimal("1e999999999").is_none());
    }

    #[test]
    fn cross_variant_comparison() {
        assert_eq!(Number::Integer(12), Number::Long(12));
        assert_eq!(Number::Integer(12), Number::Double(12.0));
        assert_eq!(Number::Float(12.1), Number::Double(12.1));
        assert_eq!(
            Number::BigDecimal(BigDecimal::new(BigInt::from(1210), 2)),
            Number::BigDecimal(BigDecimal::new(BigInt::from(121), 1))
        );
        assert!(Number::Integer(5) < Number::Float(8.95));
    }

    #[test]
    fn arithmetic_promotes() {
        let sum = Number::Integer(i32::MAX).checked_add(&Number::Integer(1)).expect("no overflow");
        assert!(matches!(sum, Number::Long(_)));
        let wide = Number::Long(i64::MAX).checked_mul(&Number::Long(i64::MAX)).expect("no overflow");
        assert!(matches!(wide, Number::BigInteger(_)));
        let half = Number::Integer(1).checked_div(&Number::Integer(2)).expect("non-zero divisor");
        assert_eq!(half, Number::Double(0.5));
        assert!(Number::Integer(1).checked_div(&Number::Integer(0)).is_none());
        assert!(Number::Integer(1).checked_rem(&Number::Integer(0)).is_none());
    }

    #[test]
    fn lossy_narrowing_matches_cast_semantics() {
        assert_eq!(Number::Long(i64::MAX).to_i64_lossy() as i8, -1);
        assert_eq!(Number::Float(12.99).to_i64_lossy(), 12);
        let wide = Number::BigInteger(BigInt::from(u64::MAX) + BigInt::from(2));
        assert_eq!(wide.to_i64_lossy(), 1);
        assert_eq!(Number::BigInteger(BigInt::from(-3)).to_i64_lossy(), -3);
        let decimal = parse_decimal("-7.9").map(Number::BigDecimal).expect("decimal");
        assert_eq!(decimal.to_i64_lossy(), -7);
    }
}
