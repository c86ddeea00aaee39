//! Numbers with CLDR plural operands.
//!
//! CLDR plural rules are defined on the *visible digits* of a number, not on
//! its mathematical value: `1` and `1.0` select different cases in English.
//! A [`Number`] therefore keeps the text it was read from and answers every
//! operand as a slice of that text:
//!
//! | operand | meaning                                          | `"-1.20"` |
//! |---------|--------------------------------------------------|-----------|
//! | `n`     | absolute value                                   | `1.20`    |
//! | `i`     | integer digits                                   | `1`       |
//! | `v`     | visible fraction digit count, trailing zeros in  | `2`       |
//! | `w`     | visible fraction digit count, trailing zeros out | `1`       |
//! | `f`     | fraction digits, trailing zeros in               | `20`      |
//! | `t`     | fraction digits, trailing zeros out              | `2`       |
//! | `e`     | exponent                                         | `0`       |
//!
//! Native representations (`Int`, `Float`, `Big`) answer the same contract;
//! floats go through their shortest round-trip rendering and so cannot carry
//! trailing zeros. Text is the canonical representation.
//!
//! ## Exponents
//!
//! `1.2e3` (also `E`, `⏨`, and CLDR's compact `c`) is shifted into
//! `1200` before `i`/`v`/`f`/`t` are taken, while `e` is read from the
//! original literal. Shifts larger than [`MAX_EXPONENT_SHIFT`] fall back to
//! `f64`.
//!
//! ## Modulo
//!
//! [`Number::modulo`] by a power of the radix keeps a suffix of the original
//! text (`1000.50 % 100` is `00.50`, still with `v = 2`). Other divisors reduce
//! the integer part numerically and carry the fraction digits over verbatim.

#[path = "number/arith.rs"]
mod arith;
#[path = "number/layout.rs"]
mod layout;

pub use arith::{Decimal, MAX_DECIMAL_SCALE};

use crate::error::NumberError;
use arith::{Exact, power_of, rem_digits, to_radix_string};
use layout::{Layout, ScanFlags};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;

/// Largest exponent that is materialized by shifting digits in text.
pub const MAX_EXPONENT_SHIFT: i64 = 4096;

/// CLDR operand names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    N,
    I,
    V,
    W,
    F,
    T,
    E,
}

impl Operand {
    /// Operand for a rule-text name. `c` is CLDR's alias of `e`.
    pub fn from_name(name: &str) -> Option<Operand> {
        Some(match name {
            "n" => Operand::N,
            "i" => Operand::I,
            "v" => Operand::V,
            "w" => Operand::W,
            "f" => Operand::F,
            "t" => Operand::T,
            "e" | "c" => Operand::E,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Operand::N => "n",
            Operand::I => "i",
            Operand::V => "v",
            Operand::W => "w",
            Operand::F => "f",
            Operand::T => "t",
            Operand::E => "e",
        }
    }
}

/// An immutable numeric value.
///
/// Equality and hashing compare the *visible form* (`1.0 != 1`), which is what
/// structural AST equality needs. Use [`Number::value_eq`] and
/// [`Number::value_cmp`] for numeric comparison.
#[derive(Debug, Clone, Default)]
pub enum Number {
    /// No value (read from empty text). Every projection is `Empty` too.
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Big(BigInt),
    Text(TextNumber),
}

/// A literal kept as text: a shared source string plus scanned regions.
#[derive(Debug, Clone)]
pub struct TextNumber {
    text: Arc<str>,
    layout: Layout,
    negative: bool,
}

enum Shift {
    None,
    Text(TextNumber),
    Overflow(f64),
}

impl TextNumber {
    /// Scan the whole of `text`, ignoring surrounding whitespace.
    pub fn parse(text: Arc<str>) -> Result<TextNumber, NumberError> {
        let start = text.len() - text.trim_start().len();
        let end = text.trim_end().len().max(start);
        Self::scan(text, start..end)
    }

    /// Scan `text[span]`, sharing `text` with the caller.
    pub(crate) fn scan(text: Arc<str>, span: Range<usize>) -> Result<TextNumber, NumberError> {
        let layout = Layout::scan(&text, span, false)?;
        let negative = layout.flags.contains(ScanFlags::NEGATIVE);
        Ok(TextNumber { text, layout, negative })
    }

    fn slice(&self, layout: Layout, negative: bool) -> TextNumber {
        TextNumber { text: Arc::clone(&self.text), layout, negative }
    }

    fn digits(&self, range: Range<usize>) -> Number {
        if range.is_empty() {
            return Number::Int(0);
        }
        Number::Text(self.slice(Layout::digits(&self.text, range, self.layout.is_hex()), false))
    }

    /// The literal as written, without sign.
    pub fn source(&self) -> &str {
        &self.text[self.layout.body.clone()]
    }

    fn shift(&self) -> Shift {
        if !self.layout.flags.contains(ScanFlags::EXPONENT) {
            return Shift::None;
        }
        let exp = self.layout.exponent(&self.text);
        if exp == 0 {
            return Shift::None;
        }
        let int = &self.text[self.layout.int.clone()];
        let frac = &self.text[self.layout.frac.clone()];
        if exp.abs() > MAX_EXPONENT_SHIFT {
            let sign = if self.negative { "-" } else { "" };
            let int = if int.is_empty() { "0" } else { int };
            let frac = if frac.is_empty() { "0" } else { frac };
            let value = format!("{sign}{int}.{frac}e{exp}").parse().unwrap_or(f64::NAN);
            return Shift::Overflow(value);
        }

        let digits = format!("{int}{frac}");
        let point = int.len() as i64 + exp;
        let mut shifted = String::with_capacity(digits.len() + exp.unsigned_abs() as usize + 3);
        if self.negative {
            shifted.push('-');
        }
        if point <= 0 {
            shifted.push_str("0.");
            shifted.extend(std::iter::repeat_n('0', (-point) as usize));
            shifted.push_str(&digits);
        } else if point as usize >= digits.len() {
            shifted.push_str(&digits);
            shifted.extend(std::iter::repeat_n('0', point as usize - digits.len()));
        } else {
            let (head, tail) = digits.split_at(point as usize);
            shifted.push_str(head);
            shifted.push('.');
            shifted.push_str(tail);
        }
        match TextNumber::parse(Arc::from(shifted)) {
            Ok(number) => Shift::Text(number),
            Err(_) => Shift::Overflow(f64::NAN),
        }
    }

    /// The same value with any exponent folded into the digits.
    fn scaled(&self) -> Number {
        match self.shift() {
            Shift::None => Number::Text(self.clone()),
            Shift::Text(number) => Number::Text(number),
            Shift::Overflow(value) => Number::Float(value),
        }
    }

    fn exact_unscaled(&self) -> Exact {
        let int = &self.text[self.layout.int.clone()];
        let frac = &self.text[self.layout.frac.clone()];
        if self.layout.is_hex() {
            Exact::from_hex(self.negative, int, frac)
        } else {
            Exact::new(self.negative, int, frac)
        }
    }

    fn int_part(&self) -> Number {
        self.digits(self.layout.int.clone())
    }

    fn frac_part(&self) -> Number {
        self.digits(self.layout.frac.clone())
    }

    fn frac_significant_part(&self) -> Number {
        self.digits(self.layout.frac.start..self.layout.frac_significant)
    }

    fn visible_fraction(&self) -> usize {
        self.layout.frac.len()
    }

    fn significant_fraction(&self) -> usize {
        self.layout.frac_significant - self.layout.frac.start
    }

    fn exponent(&self) -> Number {
        if self.layout.exp.is_empty() {
            return Number::Int(0);
        }
        match TextNumber::scan(Arc::clone(&self.text), self.layout.exp.clone()) {
            Ok(number) => Number::Text(number),
            Err(_) => Number::Int(self.layout.exponent(&self.text)),
        }
    }

    fn abs(&self) -> TextNumber {
        self.slice(self.layout.clone(), false)
    }

    fn modulo(&self, divisor: u64) -> Number {
        match self.shift() {
            Shift::None => self.modulo_unscaled(divisor),
            Shift::Text(number) => number.modulo_unscaled(divisor),
            Shift::Overflow(value) => Number::Float(value % divisor as f64),
        }
    }

    fn modulo_unscaled(&self, divisor: u64) -> Number {
        let radix = self.layout.radix();
        if let Some(keep) = power_of(divisor, radix) {
            let layout = self.layout.trailing(&self.text, keep);
            let negative = self.negative && !layout.is_zero();
            return Number::Text(self.slice(layout, negative));
        }

        let rem = rem_digits(&self.text[self.layout.int.clone()], radix, divisor);
        if !self.layout.has_point() {
            let rem = rem as i64;
            return Number::Int(if self.negative { -rem } else { rem });
        }

        let frac = &self.text[self.layout.frac.clone()];
        let negative = self.negative && (rem != 0 || self.layout.frac_significant != self.layout.frac.start);
        let sign = if negative { "-" } else { "" };
        let prefix = if self.layout.is_hex() { "0x" } else { "" };
        let text = format!("{sign}{prefix}{}.{frac}", to_radix_string(rem, radix));
        match TextNumber::parse(Arc::from(text)) {
            Ok(number) => Number::Text(number),
            Err(_) => Number::Int(rem as i64),
        }
    }
}

impl fmt::Display for TextNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        let body = self.source();
        if self.layout.is_hex() && !(body.starts_with("0x") || body.starts_with("0X")) {
            f.write_str("0x")?;
        }
        if body.is_empty() { f.write_str("0") } else { f.write_str(body) }
    }
}

fn narrow(value: BigInt) -> Number {
    match value.to_i64() {
        Some(v) => Number::Int(v),
        None => Number::Big(value),
    }
}

/// Text rendering of a finite float (shortest round-trip, never scientific).
fn float_text(value: f64) -> Option<TextNumber> {
    if !value.is_finite() {
        return None;
    }
    TextNumber::parse(Arc::from(value.to_string())).ok()
}

impl Number {
    /// Read a number from text. Empty (or all-whitespace) text is [`Number::Empty`].
    pub fn parse(text: &str) -> Result<Number, NumberError> {
        if text.trim().is_empty() {
            return Ok(Number::Empty);
        }
        TextNumber::parse(Arc::from(text)).map(Number::Text)
    }

    pub fn has_value(&self) -> bool {
        !matches!(self, Number::Empty)
    }

    /// `-1`, `0` or `1`. Negative zero is `0`.
    pub fn sign(&self) -> i8 {
        match self {
            Number::Empty => 0,
            Number::Int(v) => v.signum() as i8,
            Number::Float(v) if *v > 0.0 => 1,
            Number::Float(v) if *v < 0.0 => -1,
            Number::Float(_) => 0,
            Number::Big(v) => {
                if v.is_zero() {
                    0
                } else if v.is_negative() {
                    -1
                } else {
                    1
                }
            }
            Number::Text(t) if t.layout.is_zero() => 0,
            Number::Text(t) => {
                if t.negative {
                    -1
                } else {
                    1
                }
            }
        }
    }

    /// True when a non-zero fraction digit is visible.
    pub fn is_float(&self) -> bool {
        self.w() > 0
    }

    /// Absolute value.
    pub fn n(&self) -> Number {
        match self {
            Number::Empty => Number::Empty,
            Number::Int(v) => match v.checked_abs() {
                Some(abs) => Number::Int(abs),
                None => Number::Big(BigInt::from(*v).abs()),
            },
            Number::Float(v) => Number::Float(v.abs()),
            Number::Big(v) => Number::Big(v.abs()),
            Number::Text(t) => Number::Text(t.abs()),
        }
    }

    /// Integer digits.
    pub fn i(&self) -> Number {
        match self {
            Number::Empty => Number::Empty,
            Number::Int(_) | Number::Big(_) => self.n(),
            Number::Float(v) => match float_text(*v) {
                Some(t) => t.int_part(),
                None => Number::Float(v.abs().trunc()),
            },
            Number::Text(t) => match t.scaled() {
                Number::Text(scaled) => scaled.int_part(),
                other => other.i(),
            },
        }
    }

    /// Visible fraction digit count, with trailing zeros.
    pub fn v(&self) -> usize {
        match self {
            Number::Empty | Number::Int(_) | Number::Big(_) => 0,
            Number::Float(v) => float_text(*v).map(|t| t.visible_fraction()).unwrap_or(0),
            Number::Text(t) => match t.scaled() {
                Number::Text(scaled) => scaled.visible_fraction(),
                other => other.v(),
            },
        }
    }

    /// Visible fraction digit count, without trailing zeros.
    pub fn w(&self) -> usize {
        match self {
            Number::Empty | Number::Int(_) | Number::Big(_) => 0,
            Number::Float(v) => float_text(*v).map(|t| t.significant_fraction()).unwrap_or(0),
            Number::Text(t) => match t.scaled() {
                Number::Text(scaled) => scaled.significant_fraction(),
                other => other.w(),
            },
        }
    }

    /// Visible fraction digits, with trailing zeros.
    pub fn f(&self) -> Number {
        match self {
            Number::Empty => Number::Empty,
            Number::Int(_) | Number::Big(_) => Number::Int(0),
            Number::Float(v) => float_text(*v).map(|t| t.frac_part()).unwrap_or(Number::Int(0)),
            Number::Text(t) => match t.scaled() {
                Number::Text(scaled) => scaled.frac_part(),
                other => other.f(),
            },
        }
    }

    /// Visible fraction digits, without trailing zeros.
    pub fn t(&self) -> Number {
        match self {
            Number::Empty => Number::Empty,
            Number::Int(_) | Number::Big(_) => Number::Int(0),
            Number::Float(v) => float_text(*v).map(|t| t.frac_significant_part()).unwrap_or(Number::Int(0)),
            Number::Text(t) => match t.scaled() {
                Number::Text(scaled) => scaled.frac_significant_part(),
                other => other.t(),
            },
        }
    }

    /// Exponent as written in the literal.
    pub fn e(&self) -> Number {
        match self {
            Number::Empty => Number::Empty,
            Number::Text(t) => t.exponent(),
            _ => Number::Int(0),
        }
    }

    pub fn operand(&self, operand: Operand) -> Number {
        match operand {
            Operand::N => self.n(),
            Operand::I => self.i(),
            Operand::V => Number::from(self.v()),
            Operand::W => Number::from(self.w()),
            Operand::F => self.f(),
            Operand::T => self.t(),
            Operand::E => self.e(),
        }
    }

    /// Remainder after division by `divisor`, sign following the dividend.
    ///
    /// Returns `None` for a zero divisor.
    pub fn modulo(&self, divisor: i64) -> Option<Number> {
        if divisor == 0 {
            return None;
        }
        let d = divisor.unsigned_abs();
        Some(match self {
            Number::Empty => Number::Empty,
            Number::Int(v) => Number::Int((i128::from(*v) % i128::from(d)) as i64),
            Number::Float(v) => Number::Float(v % d as f64),
            Number::Big(v) => narrow(v % BigInt::from(d)),
            Number::Text(t) => t.modulo(d),
        })
    }

    fn exact(&self) -> Option<Exact> {
        match self {
            Number::Empty => None,
            Number::Int(v) => Some(Exact::from_plain(&v.to_string())),
            Number::Big(v) => Some(Exact::from_plain(&v.to_string())),
            Number::Float(v) if v.is_finite() => Some(Exact::from_plain(&v.to_string())),
            Number::Float(_) => None,
            Number::Text(t) => match t.scaled() {
                Number::Text(scaled) => Some(scaled.exact_unscaled()),
                other => other.exact(),
            },
        }
    }

    /// Numeric comparison across representations. `None` when either side
    /// has no value or is NaN.
    pub fn value_cmp(&self, other: &Number) -> Option<Ordering> {
        match (self.exact(), other.exact()) {
            (Some(a), Some(b)) => Some(a.compare(&b)),
            _ => self.try_f64()?.partial_cmp(&other.try_f64()?),
        }
    }

    pub fn value_eq(&self, other: &Number) -> bool {
        self.value_cmp(other) == Some(Ordering::Equal)
    }

    /// True for finite values with no non-zero fraction digit.
    pub fn is_integer(&self) -> bool {
        self.exact().is_some_and(|e| e.is_integer())
    }

    pub fn try_i64(&self) -> Option<i64> {
        match self {
            Number::Int(v) => Some(*v),
            Number::Big(v) => v.to_i64(),
            _ => self.exact()?.to_i64(),
        }
    }

    pub fn try_bigint(&self) -> Option<BigInt> {
        match self {
            Number::Int(v) => Some(BigInt::from(*v)),
            Number::Big(v) => Some(v.clone()),
            _ => self.exact()?.to_bigint(),
        }
    }

    pub fn try_f64(&self) -> Option<f64> {
        match self {
            Number::Empty => None,
            Number::Int(v) => Some(*v as f64),
            Number::Float(v) => Some(*v),
            Number::Big(v) => v.to_f64(),
            Number::Text(t) => match t.scaled() {
                Number::Text(scaled) => Some(scaled.exact_unscaled().to_f64()),
                other => other.try_f64(),
            },
        }
    }

    pub fn try_decimal(&self) -> Option<Decimal> {
        self.exact()?.to_decimal()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Empty => Ok(()),
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
            Number::Big(v) => write!(f, "{v}"),
            Number::Text(t) => write!(f, "{t}"),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Empty, Number::Empty) => true,
            (Number::Empty, _) | (_, Number::Empty) => false,
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.has_value().hash(state);
        self.to_string().hash(state);
    }
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Number, NumberError> {
        Number::parse(s)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Number {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Number {
        Number::Int(i64::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Number {
        Number::Int(i64::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Number {
        narrow(BigInt::from(value))
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Number {
        narrow(BigInt::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Number {
        Number::Float(value)
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Number {
        narrow(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number::parse(s).unwrap()
    }

    fn assert_value(n: &Number, expected: i64) {
        assert!(n.value_eq(&Number::Int(expected)), "{n} != {expected}");
    }

    #[test]
    fn operands_of_decimal_with_trailing_zero() {
        let n = num("1.20");
        assert_value(&n.i(), 1);
        assert_eq!(n.v(), 2);
        assert_eq!(n.w(), 1);
        assert_value(&n.f(), 20);
        assert_value(&n.t(), 2);
        assert_eq!(n.n().to_string(), "1.20");
        assert!(n.is_float());
    }

    #[test]
    fn operands_of_integer() {
        let n = num("1001");
        assert_value(&n.i(), 1001);
        assert_eq!(n.v(), 0);
        assert_value(&n.f(), 0);
        assert_value(&n.t(), 0);
        assert!(!n.is_float());
    }

    #[test]
    fn negative_sign_and_absolute_value() {
        let n = num("-3.40");
        assert_eq!(n.sign(), -1);
        assert_eq!(n.n().sign(), 1);
        assert_eq!(n.n().to_string(), "3.40");
        assert_eq!(num("-0").sign(), 0);
        assert_eq!(num("0.000").sign(), 0);
    }

    #[test]
    fn leading_zeros_stay_visible() {
        let n = num("007");
        assert_eq!(n.i().to_string(), "007");
        assert_value(&n.i(), 7);
    }

    #[test]
    fn one_and_one_point_zero_differ() {
        let one = num("1");
        let one_zero = num("1.0");
        assert!(one.value_eq(&one_zero));
        assert_ne!(one, one_zero);
        assert_eq!(one.v(), 0);
        assert_eq!(one_zero.v(), 1);
        assert!(!one_zero.is_float());
    }

    #[test]
    fn exponent_shifts_digits() {
        let n = num("1.023e4");
        assert_value(&n.i(), 10230);
        assert_eq!(n.v(), 0);
        assert_value(&n.e(), 4);

        let n = num("1.2345e2");
        assert_value(&n.i(), 123);
        assert_eq!(n.v(), 2);
        assert_value(&n.f(), 45);

        let n = num("12c-3");
        assert_value(&n.i(), 0);
        assert_eq!(n.f().to_string(), "012");
        assert_eq!(n.e().to_string(), "-3");

        assert!(num("10").value_eq(&num("1e1")));
        assert_ne!(num("10"), num("1e1"));
    }

    #[test]
    fn every_exponent_marker() {
        let n = num("1.5⏨3");
        assert_value(&n.i(), 1500);
        assert_eq!(n.v(), 0);
        assert_value(&n.e(), 3);
        assert_eq!(n.to_string(), "1.5⏨3");

        let n = num("1.2E3");
        assert_value(&n.i(), 1200);
        assert_eq!(n.v(), 0);
        assert_value(&n.e(), 3);

        let n = num("1.25E1");
        assert_value(&n.i(), 12);
        assert_eq!(n.v(), 1);
        assert_value(&n.f(), 5);

        assert!(num("2⏨3").value_eq(&num("2c3")));
        assert!(num("2E3").value_eq(&num("2000")));
    }

    #[test]
    fn huge_exponent_falls_back_to_float() {
        let n = num("1e5000");
        assert_eq!(n.try_f64(), Some(f64::INFINITY));
        assert_eq!(n.e().to_string(), "5000");
    }

    #[test]
    fn empty_text_has_no_value() {
        let n = num("");
        assert!(!n.has_value());
        assert!(!n.i().has_value());
        assert!(!n.f().has_value());
        assert!(!n.modulo(10).unwrap().has_value());
        assert_eq!(n.sign(), 0);
    }

    #[test]
    fn point_only_is_zero() {
        let n = num(".");
        assert!(n.value_eq(&Number::Int(0)));
        assert_eq!(n.v(), 0);
        assert_value(&num(".5").i(), 0);
    }

    #[test]
    fn modulo_slices_text_for_powers_of_ten() {
        let m = num("1001").modulo(100).unwrap();
        assert_value(&m.i(), 1);
        assert_eq!(m.to_string(), "01");

        let m = num("1000.50").modulo(100).unwrap();
        assert_value(&m.i(), 0);
        assert_eq!(m.v(), 2);
        assert_value(&m.f(), 50);
        assert_eq!(m.to_string(), "00.50");

        assert_eq!(num("5.5").modulo(1000).unwrap().to_string(), "5.5");
        assert_eq!(num("-1001").modulo(100).unwrap().to_string(), "-01");
    }

    #[test]
    fn modulo_with_other_divisors() {
        let m = num("1001.50").modulo(7).unwrap();
        assert_eq!(m.to_string(), "0.50");
        assert_eq!(m.v(), 2);

        assert_eq!(num("-7").modulo(3), Some(Number::Int(-1)));
        assert_eq!(Number::Int(-7).modulo(3), Some(Number::Int(-1)));
        assert!(num("12345678901234567890123").modulo(9).unwrap().value_eq(&Number::Int(6)));
        assert!(Number::Float(7.5).modulo(2).unwrap().value_eq(&num("1.5")));
        assert_eq!(num("1").modulo(0), None);
    }

    #[test]
    fn modulo_after_exponent() {
        let m = num("1.2345e3").modulo(100).unwrap();
        assert_eq!(m.to_string(), "34.5");
    }

    #[test]
    fn hexadecimal_literals() {
        let n = num("0x1F");
        assert_value(&n, 31);
        let m = n.modulo(16).unwrap();
        assert_eq!(m.to_string(), "0xF");
        assert_value(&m, 15);
        assert!(num("0x1.8").value_eq(&num("1.5")));
        assert_eq!(num("0x1.8").v(), 1);
    }

    #[test]
    fn native_representations_share_the_contract() {
        let f = Number::from(1.5);
        assert_value(&f.i(), 1);
        assert_eq!(f.v(), 1);
        assert_value(&f.f(), 5);
        assert_eq!(Number::from(1.0).v(), 0);

        let i = Number::from(-42);
        assert_eq!(i.sign(), -1);
        assert_value(&i.n(), 42);
        assert_eq!(i.v(), 0);
        assert_eq!(Number::Int(i64::MIN).n().to_string(), "9223372036854775808");

        let big = Number::from(BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap());
        assert!(matches!(big, Number::Big(_)));
        assert!(big.modulo(1000).unwrap().value_eq(&Number::Int(890)));
    }

    #[test]
    fn narrowing_getters() {
        assert_eq!(num("42").try_i64(), Some(42));
        assert_eq!(num("4.2").try_i64(), None);
        assert_eq!(num("4.0").try_i64(), Some(4));
        assert_eq!(num("99999999999999999999").try_i64(), None);
        let big = num("99999999999999999999").try_bigint().map(|b| b.to_string());
        assert_eq!(big.as_deref(), Some("99999999999999999999"));
        assert_eq!(num("1.25").try_f64(), Some(1.25));
        assert_eq!(num("-1.250").try_decimal(), Some(Decimal { mantissa: -125, scale: 2 }));
        assert_eq!(Number::Empty.try_f64(), None);
    }

    #[test]
    fn value_ordering_across_representations() {
        assert_eq!(num("2.5").value_cmp(&Number::Int(3)), Some(Ordering::Less));
        assert_eq!(Number::Float(2.5).value_cmp(&num("2.50")), Some(Ordering::Equal));
        assert_eq!(num("1e3").value_cmp(&num("999.9")), Some(Ordering::Greater));
        assert_eq!(Number::Float(f64::NAN).value_cmp(&Number::Int(1)), None);
    }

    #[test]
    fn rejects_invalid_text() {
        assert!(Number::parse("1,5").is_err());
        assert!(Number::parse("abc").is_err());
        assert!("2.5".parse::<Number>().is_ok());
    }
}
