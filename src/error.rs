//! Error types.
//!
//! Each stage of the pipeline has its own error enum so callers can match on
//! the failure they care about; [`PluralError`] wraps all of them for the
//! resolver and the public API.
//!
//! ```text
//! text ──tokenize/parse──▶ ParseError
//! number text ──scan────▶ NumberError
//! Expr × Number ─eval───▶ EvalError
//! rules ──compile/resolve▶ PluralError (wraps the three above)
//! ```

use thiserror::Error;

/// Failure to read a numeric literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("invalid character '{found}' at offset {offset} in number \"{text}\"")]
    InvalidCharacter { text: String, offset: usize, found: char },

    #[error("exponent without digits at offset {offset} in number \"{text}\"")]
    EmptyExponent { text: String, offset: usize },
}

/// Rule text does not conform to the grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedCharacter { offset: usize, found: char },

    #[error("could not parse rule text at offset {offset}: \"{remainder}\"")]
    Unparsed { offset: usize, remainder: String },

    #[error("invalid numeric literal at offset {offset}: {source}")]
    InvalidLiteral {
        offset: usize,
        #[source]
        source: NumberError,
    },

    #[error("invalid rule info {name}={value}")]
    InvalidInfo { name: String, value: String },

    #[error("rule for case \"{case}\" has no condition; only catch-all cases may omit it")]
    MissingCondition { case: String },

    #[error("rule text is empty")]
    Empty,
}

/// A parsed expression cannot be evaluated against a number.
///
/// These indicate a malformed or unsupported rule, never a non-match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("expression `{expr}` does not produce a boolean")]
    NotABoolean { expr: String },

    #[error("expression `{expr}` does not produce a number")]
    NotANumber { expr: String },

    #[error("modulo divisor `{divisor}` is not an integer within i32 range")]
    ModuloOutOfRange { divisor: String },

    #[error("modulo by zero in `{expr}`")]
    DivisionByZero { expr: String },

    #[error("cannot order `{left}` against `{right}`")]
    NotComparable { left: String, right: String },
}

/// Errors surfaced by rule-set construction, resolution and selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluralError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("rule set {key} has {count} optional cases (maximum is {max})")]
    TooManyOptionalCases { key: String, count: usize, max: usize },

    #[error("rule set \"{name}\" was not found")]
    RuleSetNotFound { name: String },

    #[error("invalid evaluation filter: {reason}")]
    InvalidFilter { reason: String },
}
