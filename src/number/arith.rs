//! Exact value view and numeric fallbacks.
//!
//! Operands are answered from text, but comparisons (`n = 1`, `i < 5`) need a
//! value. [`Exact`] is a canonical decimal rendering of any finite number:
//! integer digits without leading zeros, fraction digits without trailing
//! zeros. Two numbers are equal iff their `Exact` forms are equal, which makes
//! `1`, `1.0`, `1.000` and `0x1` compare equal without going through `f64`.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::cmp::Ordering;

/// Fixed-point decimal: `mantissa / 10^scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    pub mantissa: i128,
    pub scale: u32,
}

/// Largest scale accepted by [`Exact::to_decimal`].
pub const MAX_DECIMAL_SCALE: usize = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Exact {
    pub negative: bool,
    pub int: String,
    pub frac: String,
}

impl Exact {
    pub fn new(negative: bool, int: &str, frac: &str) -> Exact {
        let int = int.trim_start_matches('0');
        let frac = frac.trim_end_matches('0');
        let negative = negative && !(int.is_empty() && frac.is_empty());
        Exact { negative, int: int.to_string(), frac: frac.to_string() }
    }

    /// From a plain rendering such as `"12.5"` or `"-0.25"` (no exponent).
    pub fn from_plain(s: &str) -> Exact {
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int, frac) = s.split_once('.').unwrap_or((s, ""));
        Exact::new(negative, int, frac)
    }

    /// From base-16 digit runs. A hexadecimal fraction always has a finite
    /// decimal expansion: `k / 16^m == k * 625^m / 10^(4m)`.
    pub fn from_hex(negative: bool, int_digits: &str, frac_digits: &str) -> Exact {
        let int = parse_radix(int_digits, 16);
        let frac = if frac_digits.is_empty() {
            String::new()
        } else {
            let m = frac_digits.len();
            let scaled = parse_radix(frac_digits, 16) * BigInt::from(625u32).pow(m as u32);
            format!("{:0>width$}", scaled.to_string(), width = 4 * m)
        };
        Exact::new(negative, &int.to_string(), &frac)
    }

    pub fn is_integer(&self) -> bool {
        self.frac.is_empty()
    }

    pub fn compare(&self, other: &Exact) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => magnitude(self, other),
            (true, true) => magnitude(other, self),
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        if self.int.is_empty() {
            return Some(0);
        }
        let magnitude: i128 = self.int.parse().ok()?;
        i64::try_from(if self.negative { -magnitude } else { magnitude }).ok()
    }

    pub fn to_bigint(&self) -> Option<BigInt> {
        if !self.is_integer() {
            return None;
        }
        let magnitude = parse_radix(&self.int, 10);
        Some(if self.negative { -magnitude } else { magnitude })
    }

    pub fn to_f64(&self) -> f64 {
        let int = if self.int.is_empty() { "0" } else { self.int.as_str() };
        let frac = if self.frac.is_empty() { "0" } else { self.frac.as_str() };
        let sign = if self.negative { "-" } else { "" };
        format!("{sign}{int}.{frac}").parse().unwrap_or(f64::NAN)
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        if self.frac.len() > MAX_DECIMAL_SCALE {
            return None;
        }
        let digits = format!("{}{}", self.int, self.frac);
        let magnitude: i128 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
        Some(Decimal { mantissa: if self.negative { -magnitude } else { magnitude }, scale: self.frac.len() as u32 })
    }
}

fn magnitude(a: &Exact, b: &Exact) -> Ordering {
    a.int.len().cmp(&b.int.len()).then_with(|| a.int.cmp(&b.int)).then_with(|| a.frac.cmp(&b.frac))
}

/// Parse a digit run; empty or invalid input yields zero.
pub(crate) fn parse_radix(digits: &str, radix: u32) -> BigInt {
    if digits.is_empty() {
        return BigInt::zero();
    }
    BigInt::parse_bytes(digits.as_bytes(), radix).unwrap_or_default()
}

/// `digits mod divisor`, trying `u64` first and `BigInt` for longer runs.
pub(crate) fn rem_digits(digits: &str, radix: u32, divisor: u64) -> u64 {
    if digits.is_empty() {
        return 0;
    }
    if let Ok(value) = u64::from_str_radix(digits, radix) {
        return value % divisor;
    }
    (parse_radix(digits, radix) % BigInt::from(divisor)).to_u64().unwrap_or(0)
}

/// `Some(k)` when `divisor == radix^k`.
pub(crate) fn power_of(divisor: u64, radix: u32) -> Option<usize> {
    let radix = u64::from(radix);
    let mut k = 0;
    let mut rest = divisor;
    while rest > 1 {
        if rest % radix != 0 {
            return None;
        }
        rest /= radix;
        k += 1;
    }
    (rest == 1).then_some(k)
}

pub(crate) fn to_radix_string(value: u64, radix: u32) -> String {
    if radix == 16 { format!("{value:x}") } else { value.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_normalizes_zeros() {
        let e = Exact::from_plain("-007.2500");
        assert_eq!(e, Exact { negative: true, int: "7".into(), frac: "25".into() });
        assert!(!Exact::from_plain("-0.00").negative);
    }

    #[test]
    fn exact_ordering() {
        let a = Exact::from_plain("9.99");
        let b = Exact::from_plain("10");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(Exact::from_plain("-10").compare(&Exact::from_plain("-9.5")), Ordering::Less);
        assert_eq!(Exact::from_plain("0.5").compare(&Exact::from_plain("0.51")), Ordering::Less);
        assert_eq!(Exact::from_plain("1.0").compare(&Exact::from_plain("1")), Ordering::Equal);
    }

    #[test]
    fn hex_fraction_is_exact() {
        let e = Exact::from_hex(false, "1f", "8");
        assert_eq!(e.int, "31");
        assert_eq!(e.frac, "5");
    }

    #[test]
    fn powers_and_remainders() {
        assert_eq!(power_of(100, 10), Some(2));
        assert_eq!(power_of(1, 10), Some(0));
        assert_eq!(power_of(256, 16), Some(2));
        assert_eq!(power_of(50, 10), None);
        let expected = (123456789012345678901234567890u128 % 7) as u64;
        assert_eq!(rem_digits("123456789012345678901234567890", 10, 7), expected);
        assert_eq!(rem_digits("ff", 16, 10), 5);
    }

    #[test]
    fn narrowing() {
        assert_eq!(Exact::from_plain("-12").to_i64(), Some(-12));
        assert_eq!(Exact::from_plain("1.5").to_i64(), None);
        assert_eq!(Exact::from_plain("1.25").to_decimal(), Some(Decimal { mantissa: 125, scale: 2 }));
        assert_eq!(Exact::from_plain("99999999999999999999").to_i64(), None);
    }
}
