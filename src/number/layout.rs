//! Single-pass scan of a numeric literal into byte regions.
//!
//! The scan never converts digits to a value. It only records *where* each
//! region lives in the source text, so that operand projections can be taken
//! as slices of the original literal:
//!
//! ```text
//!   - 0 0 7 . 2 0 e + 4
//!   │ └─┬─┘ │ └┬┘ │ └┬┘
//!   │  int  │ frac│  exp
//!   │   │   │  └ frac_significant (end of "2")
//!   │   └ int_significant (at "7")
//!   └ NEGATIVE
//! ```
//!
//! States follow the literal left to right: `Zero` (nothing read yet, sign and
//! radix prefix allowed), `Integer`, `Fraction` and `Exponent`.

use crate::error::NumberError;
use std::ops::Range;

bitflags::bitflags! {
    /// Shape of a scanned literal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScanFlags: u8 {
        /// Literal starts with `-`.
        const NEGATIVE = 1 << 0;
        /// Literal contains a decimal point (even with no fraction digits).
        const POINT    = 1 << 1;
        /// Literal carries an exponent (`e`, `E`, `c`, `C` or `⏨`).
        const EXPONENT = 1 << 2;
        /// Digits are base 16.
        const HEX      = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Zero,
    Integer,
    Fraction,
    Exponent,
}

/// Byte regions of a literal. All offsets are absolute within the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub flags: ScanFlags,
    /// Unsigned literal: from after the sign to the end (prefix and exponent included).
    pub body: Range<usize>,
    pub int: Range<usize>,
    /// First non-zero integer digit; `int.end` when every digit is zero.
    pub int_significant: usize,
    pub frac: Range<usize>,
    /// End of the fraction without trailing zeros; `frac.start` when all zero.
    pub frac_significant: usize,
    /// Exponent digits including their sign; empty when absent.
    pub exp: Range<usize>,
}

impl Layout {
    /// Scan `text[span]`. `hex` forces base 16 for literals that lost their
    /// `0x` prefix (projections of a hexadecimal value).
    pub fn scan(text: &str, span: Range<usize>, hex: bool) -> Result<Layout, NumberError> {
        let src = &text[span.clone()];
        let mut flags = if hex { ScanFlags::HEX } else { ScanFlags::empty() };
        let mut pos = span.start;

        if let Some(c @ ('-' | '+')) = src.chars().next() {
            if c == '-' {
                flags |= ScanFlags::NEGATIVE;
            }
            pos += 1;
        }
        let body_start = pos;

        let rest = &text[pos..span.end];
        if rest.starts_with("0x") || rest.starts_with("0X") {
            flags |= ScanFlags::HEX;
            pos += 2;
        }
        let radix = if flags.contains(ScanFlags::HEX) { 16 } else { 10 };

        let mut state = ScanState::Zero;
        let mut int = pos..pos;
        let mut int_significant = None;
        let mut frac = pos..pos;
        let mut frac_significant = None;
        let mut exp = span.end..span.end;

        for (off, ch) in text[pos..span.end].char_indices() {
            let at = pos + off;
            match state {
                ScanState::Zero | ScanState::Integer => {
                    if ch.is_digit(radix) {
                        state = ScanState::Integer;
                        int.end = at + 1;
                        if ch != '0' && int_significant.is_none() {
                            int_significant = Some(at);
                        }
                    } else if ch == '.' {
                        flags |= ScanFlags::POINT;
                        int.end = at;
                        frac = at + 1..at + 1;
                        state = ScanState::Fraction;
                    } else if radix == 10 && is_exponent_marker(ch) {
                        int.end = at;
                        frac = at..at;
                        flags |= ScanFlags::EXPONENT;
                        exp = at + ch.len_utf8()..span.end;
                        state = ScanState::Exponent;
                    } else {
                        return Err(invalid(text, &span, at, ch));
                    }
                }
                ScanState::Fraction => {
                    if ch.is_digit(radix) {
                        frac.end = at + 1;
                        if ch != '0' {
                            frac_significant = Some(at + 1);
                        }
                    } else if radix == 10 && is_exponent_marker(ch) {
                        flags |= ScanFlags::EXPONENT;
                        exp = at + ch.len_utf8()..span.end;
                        state = ScanState::Exponent;
                    } else {
                        return Err(invalid(text, &span, at, ch));
                    }
                }
                ScanState::Exponent => {
                    let signed = (ch == '-' || ch == '+') && at == exp.start;
                    if !signed && !ch.is_ascii_digit() {
                        return Err(invalid(text, &span, at, ch));
                    }
                }
            }
        }

        if flags.contains(ScanFlags::EXPONENT) && !text[exp.clone()].bytes().any(|b| b.is_ascii_digit()) {
            let offset = exp.start - span.start;
            return Err(NumberError::EmptyExponent { text: text[span.clone()].to_string(), offset });
        }

        Ok(Layout {
            flags,
            body: body_start..span.end,
            int_significant: int_significant.unwrap_or(int.end),
            int,
            frac_significant: frac_significant.unwrap_or(frac.start),
            frac,
            exp,
        })
    }

    /// Layout of a run of integer digits, e.g. the `i` or `f` projection.
    pub fn digits(text: &str, range: Range<usize>, hex: bool) -> Layout {
        let int_significant =
            text[range.clone()].bytes().position(|b| b != b'0').map(|p| range.start + p).unwrap_or(range.end);
        Layout {
            flags: if hex { ScanFlags::HEX } else { ScanFlags::empty() },
            body: range.clone(),
            int: range.clone(),
            int_significant,
            frac: range.end..range.end,
            frac_significant: range.end,
            exp: range.end..range.end,
        }
    }

    /// Trailing `keep` integer digits plus the untouched fraction.
    ///
    /// The result is still a contiguous slice of the source text, so it keeps
    /// every visible fraction digit of the original.
    pub fn trailing(&self, text: &str, keep: usize) -> Layout {
        let start = self.int.end - keep.min(self.int.len());
        let int_significant = if self.int_significant >= start {
            self.int_significant
        } else {
            text[start..self.int.end].bytes().position(|b| b != b'0').map(|p| start + p).unwrap_or(self.int.end)
        };
        let end = if self.flags.contains(ScanFlags::POINT) { self.frac.end } else { self.int.end };
        Layout {
            flags: self.flags & (ScanFlags::POINT | ScanFlags::HEX),
            body: start..end,
            int: start..self.int.end,
            int_significant,
            frac: self.frac.clone(),
            frac_significant: self.frac_significant,
            exp: end..end,
        }
    }

    pub fn is_hex(&self) -> bool {
        self.flags.contains(ScanFlags::HEX)
    }

    pub fn radix(&self) -> u32 {
        if self.is_hex() { 16 } else { 10 }
    }

    /// True when every digit of the mantissa is zero.
    pub fn is_zero(&self) -> bool {
        self.int_significant == self.int.end && self.frac_significant == self.frac.start
    }

    pub fn has_point(&self) -> bool {
        self.flags.contains(ScanFlags::POINT)
    }

    /// Exponent value, saturating at the `i64` bounds.
    pub fn exponent(&self, text: &str) -> i64 {
        let src = &text[self.exp.clone()];
        let (negative, digits) = match src.as_bytes().first() {
            Some(b'-') => (true, &src[1..]),
            Some(b'+') => (false, &src[1..]),
            _ => (false, src),
        };
        let mut value: i64 = 0;
        for b in digits.bytes() {
            value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
        }
        if negative { -value } else { value }
    }
}

fn is_exponent_marker(ch: char) -> bool {
    matches!(ch, 'e' | 'E' | 'c' | 'C' | '⏨')
}

fn invalid(text: &str, span: &Range<usize>, at: usize, found: char) -> NumberError {
    NumberError::InvalidCharacter { text: text[span.clone()].to_string(), offset: at - span.start, found }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(s: &str) -> Layout {
        Layout::scan(s, 0..s.len(), false).unwrap()
    }

    #[test]
    fn scans_regions_of_decimal() {
        let l = scan("-007.20e+4");
        assert!(l.flags.contains(ScanFlags::NEGATIVE | ScanFlags::POINT | ScanFlags::EXPONENT));
        assert_eq!(l.body, 1..10);
        assert_eq!(l.int, 1..4);
        assert_eq!(l.int_significant, 3);
        assert_eq!(l.frac, 5..7);
        assert_eq!(l.frac_significant, 6);
        assert_eq!(l.exp, 8..10);
        assert_eq!(l.exponent("-007.20e+4"), 4);
    }

    #[test]
    fn zero_forms() {
        assert!(scan("0").is_zero());
        assert!(scan("-0").is_zero());
        assert!(scan("0.000").is_zero());
        assert!(!scan("0.001").is_zero());
        let dot = scan(".");
        assert!(dot.is_zero());
        assert!(dot.has_point());
        assert!(dot.frac.is_empty());
    }

    #[test]
    fn hex_digits_do_not_start_an_exponent() {
        let l = scan("0x1e.8");
        assert!(l.is_hex());
        assert!(!l.flags.contains(ScanFlags::EXPONENT));
        assert_eq!(l.int, 2..4);
        assert_eq!(l.frac, 5..6);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Layout::scan("1.2.3", 0..5, false),
            Err(NumberError::InvalidCharacter { offset: 3, found: '.', .. })
        ));
        assert!(matches!(Layout::scan("1e", 0..2, false), Err(NumberError::EmptyExponent { .. })));
        assert!(Layout::scan("12a", 0..3, false).is_err());
    }

    #[test]
    fn trailing_keeps_fraction() {
        let text = "1000.50";
        let l = scan(text).trailing(text, 2);
        assert_eq!(&text[l.body.clone()], "00.50");
        assert_eq!(l.int_significant, l.int.end);
    }
}
