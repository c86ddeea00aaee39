//! Plural-rule expression tree.
//!
//! [`Expr`] is a closed sum type: the evaluator, the printer and the
//! structural `Hash`/`Eq` all match it exhaustively. The tree is immutable once
//! built and can be shared across threads.
//!
//! One rule line maps to the tree like this:
//!
//! ```text
//! [Category=cardinal,Case=one] i = 1 and v = 0 @integer 1
//! └──────── RuleInfos ───────┘ └── condition ─┘ └ Samples ┘
//!
//! condition:  Binary(LogicalAnd,
//!               Binary(Equal, Argument(i), Constant(1)),
//!               Binary(Equal, Argument(v), Constant(0)))
//! ```
//!
//! `Display` prints canonical CLDR syntax; parsing the printed text yields an
//! equal tree.

use crate::number::{Number, Operand};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    LogicalAnd,
    LogicalOr,
    ExclusiveOr,
    Modulo,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Equal => "=",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::LogicalAnd => "and",
            BinaryOp::LogicalOr => "or",
            BinaryOp::ExclusiveOr => "!=",
            BinaryOp::Modulo => "%",
        }
    }

    /// Relational operators compare two values and produce a boolean.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Less
                | BinaryOp::LessOrEqual
                | BinaryOp::Greater
                | BinaryOp::GreaterOrEqual
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplesKind {
    Integer,
    Decimal,
}

impl SamplesKind {
    pub fn from_name(name: &str) -> Option<SamplesKind> {
        match name {
            "integer" => Some(SamplesKind::Integer),
            "decimal" => Some(SamplesKind::Decimal),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SamplesKind::Integer => "integer",
            SamplesKind::Decimal => "decimal",
        }
    }
}

/// `@integer 0, 2~16, 100, …`: constants, ranges and an optional trailing `Infinite`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SamplesExpr {
    pub kind: SamplesKind,
    pub values: Vec<Expr>,
}

/// `Name=Value` inside a `[...]` info block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InfoExpr {
    pub name: String,
    pub value: String,
}

/// One full rule line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RuleExpr {
    pub infos: Vec<InfoExpr>,
    /// `None` means the rule always matches.
    pub condition: Option<Box<Expr>>,
    pub samples: Vec<SamplesExpr>,
}

impl RuleExpr {
    pub fn info(&self, name: &str) -> Option<&str> {
        self.infos.iter().find(|i| i.name.eq_ignore_ascii_case(name)).map(|i| i.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Constant(Number),
    Argument(Operand),
    /// Inclusive `min..max` (`min~max` in samples).
    Range(Box<Expr>, Box<Expr>),
    /// "Is one of": `1, 3, 5..7`.
    Group(Vec<Expr>),
    Parenthesis(Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// The `…` marker that ends a sample list.
    Infinite,
    Samples(SamplesExpr),
    RuleInfo(InfoExpr),
    RuleInfos(Vec<InfoExpr>),
    Rule(Box<RuleExpr>),
}

impl Expr {
    pub fn constant(value: impl Into<Number>) -> Expr {
        Expr::Constant(value.into())
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn range(min: Expr, max: Expr) -> Expr {
        Expr::Range(Box::new(min), Box::new(max))
    }

    /// Variant name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Constant(_) => "constant",
            Expr::Argument(_) => "argument",
            Expr::Range(..) => "range",
            Expr::Group(_) => "group",
            Expr::Parenthesis(_) => "parenthesis",
            Expr::Unary(..) => "unary",
            Expr::Binary(..) => "binary",
            Expr::Infinite => "infinite",
            Expr::Samples(_) => "samples",
            Expr::RuleInfo(_) => "rule info",
            Expr::RuleInfos(_) => "rule infos",
            Expr::Rule(_) => "rule",
        }
    }

    /// True for nodes that produce a boolean when evaluated.
    pub fn is_boolean(&self) -> bool {
        match self {
            Expr::Unary(UnaryOp::Not, _) => true,
            Expr::Binary(op, ..) => *op != BinaryOp::Modulo,
            Expr::Parenthesis(inner) => inner.is_boolean(),
            _ => false,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr], range_sep: &str) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        match item {
            Expr::Range(min, max) => write!(f, "{min}{range_sep}{max}")?,
            other => write!(f, "{other}")?,
        }
    }
    Ok(())
}

impl fmt::Display for InfoExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl fmt::Display for SamplesExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.kind.name())?;
        if !self.values.is_empty() {
            f.write_str(" ")?;
            write_list(f, &self.values, "~")?;
        }
        Ok(())
    }
}

impl fmt::Display for RuleExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.infos.is_empty() {
            parts.push(Expr::RuleInfos(self.infos.clone()).to_string());
        }
        if let Some(condition) = &self.condition {
            parts.push(condition.to_string());
        }
        parts.extend(self.samples.iter().map(|s| s.to_string()));
        f.write_str(&parts.join(" "))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(n) => write!(f, "{n}"),
            Expr::Argument(op) => f.write_str(op.name()),
            Expr::Range(min, max) => write!(f, "{min}..{max}"),
            Expr::Group(items) => write_list(f, items, ".."),
            Expr::Parenthesis(inner) => write!(f, "({inner})"),
            Expr::Unary(UnaryOp::Not, inner) => write!(f, "not {inner}"),
            // Boolean equality must not read back as a value relation.
            Expr::Binary(BinaryOp::Equal, left, right) if left.is_boolean() => write!(f, "{left} == {right}"),
            Expr::Binary(op, left, right) => write!(f, "{left} {} {right}", op.symbol()),
            Expr::Infinite => f.write_str("…"),
            Expr::Samples(samples) => write!(f, "{samples}"),
            Expr::RuleInfo(info) => write!(f, "{info}"),
            Expr::RuleInfos(infos) => {
                f.write_str("[")?;
                for (idx, info) in infos.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{info}")?;
                }
                f.write_str("]")
            }
            Expr::Rule(rule) => write!(f, "{rule}"),
        }
    }
}
