//! Rule-text tokenizer.
//!
//! Splits rule text into a flat token stream. Every byte of the input belongs
//! to exactly one token, including whitespace and comments, which are marked
//! *non-essential* so the parser can skip them without losing offsets.
//!
//! ```text
//! "i = 1 and v = 0 @integer 1"
//!  │ │ │ │   │ │ │ │        │
//!  │ │ │ │   │ │ │ │        └ Integer
//!  │ │ │ │   │ │ │ └ AtName
//!  │ │ │ └ Name("and")
//!  │ │ └ Integer
//!  │ └ Assign
//!  └ Name("i")           (Whitespace tokens between each)
//! ```
//!
//! Literal and name classes are matched with anchored regexes (see the
//! `regex!` macro); punctuation is matched longest-first by hand.

use crate::error::ParseError;
use regex::Regex;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Integer,
    Float,
    Name,
    QuotedName,
    AtName,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Semicolon,
    /// `=`
    Assign,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Percent,
    Tilde,
    /// `…` or `...`
    Ellipsis,
    /// `..`
    DotDot,
    /// `!`
    Bang,
    AndAnd,
    OrOr,
    Whitespace,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    /// Whitespace and comments never carry meaning.
    pub fn is_essential(&self) -> bool {
        !matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn text<'t>(&self, source: &'t str) -> &'t str {
        &source[self.span.clone()]
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TokenKind::Integer | TokenKind::Float)
    }
}

const PUNCTUATION: &[(&str, TokenKind)] = &[
    ("...", TokenKind::Ellipsis),
    ("…", TokenKind::Ellipsis),
    ("..", TokenKind::DotDot),
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEqual),
    ("<=", TokenKind::LessOrEqual),
    (">=", TokenKind::GreaterOrEqual),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
    ("=", TokenKind::Assign),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("%", TokenKind::Percent),
    ("~", TokenKind::Tilde),
    ("!", TokenKind::Bang),
];

fn patterns() -> [(&'static Regex, TokenKind); 8] {
    [
        (regex!(r"^\s+"), TokenKind::Whitespace),
        (regex!(r"^(?://[^\n]*|/\*(?s:.*?)\*/)"), TokenKind::Comment),
        (regex!(r"^0[xX][0-9a-fA-F]+\.[0-9a-fA-F]+"), TokenKind::Float),
        (regex!(r"^0[xX][0-9a-fA-F]+"), TokenKind::Integer),
        (regex!(r"^(?:[0-9]+\.[0-9]+(?:[eEcC⏨][+-]?[0-9]+)?|[0-9]+[eEcC⏨][+-]?[0-9]+)"), TokenKind::Float),
        (regex!(r"^[0-9]+"), TokenKind::Integer),
        (regex!(r"^@[A-Za-z_][A-Za-z0-9_]*"), TokenKind::AtName),
        (regex!(r#"^(?:[A-Za-z_](?:[A-Za-z0-9_\-]|\.[A-Za-z0-9_])*|"[^"]*"|'[^']*')"#), TokenKind::Name),
    ]
}

/// Split `text` into tokens covering every byte.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let patterns = patterns();
    let mut tokens = Vec::new();
    let mut pos = 0;

    'outer: while pos < text.len() {
        let rest = &text[pos..];

        for (re, kind) in &patterns {
            if let Some(m) = re.find(rest) {
                let kind = match *kind {
                    TokenKind::Name if rest.starts_with(['"', '\'']) => TokenKind::QuotedName,
                    other => other,
                };
                tokens.push(Token { kind, span: pos..pos + m.end() });
                pos += m.end();
                continue 'outer;
            }
        }

        for (symbol, kind) in PUNCTUATION {
            if rest.starts_with(symbol) {
                tokens.push(Token { kind: *kind, span: pos..pos + symbol.len() });
                pos += symbol.len();
                continue 'outer;
            }
        }

        let found = rest.chars().next().unwrap_or_default();
        return Err(ParseError::UnexpectedCharacter { offset: pos, found });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).unwrap().into_iter().filter(|t| t.is_essential()).map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_relation() {
        use TokenKind::*;
        assert_eq!(kinds("n % 100 != 11..19"), vec![Name, Percent, Integer, NotEqual, Integer, DotDot, Integer]);
    }

    #[test]
    fn tokens_cover_every_byte() {
        let text = "i = 1 and v = 0 // one\n@integer 1";
        let tokens = tokenize(text).unwrap();
        let mut expected = 0;
        for t in &tokens {
            assert_eq!(t.span.start, expected);
            expected = t.span.end;
        }
        assert_eq!(expected, text.len());
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Comment));
    }

    #[test]
    fn literals_with_exponents_and_samples() {
        use TokenKind::*;
        assert_eq!(
            kinds("@decimal 1.0000001c6, 1.1c6, 2~17, …"),
            vec![AtName, Float, Comma, Float, Comma, Integer, Tilde, Integer, Comma, Ellipsis]
        );
        assert_eq!(kinds("0.0~1.5 ..."), vec![Float, Tilde, Float, Ellipsis]);
        assert_eq!(kinds("0x1F 1e3"), vec![Integer, Float]);
        assert_eq!(kinds("1⏨3 1.5E3 2C-1"), vec![Float, Float, Float]);
    }

    #[test]
    fn names_and_infos() {
        use TokenKind::*;
        assert_eq!(
            kinds("[RuleSet=Unicode.CLDR,Culture=\"en-US\",Optional=1]"),
            vec![LBracket, Name, Assign, Name, Comma, Name, Assign, QuotedName, Comma, Name, Assign, Integer, RBracket]
        );
    }

    #[test]
    fn reports_unexpected_character() {
        assert_eq!(tokenize("n = 1 $"), Err(ParseError::UnexpectedCharacter { offset: 6, found: '$' }));
    }
}
