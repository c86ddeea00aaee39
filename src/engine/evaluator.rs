//! Expression evaluation against a target number.
//!
//! ```text
//! Expr ──evaluate_bool──▶ bool     (relations, and/or/xor, not)
//!      └─evaluate_number─▶ Number  (constants, operands, modulo)
//! ```
//!
//! Both entry points match every [`Expr`] variant. A variant without a
//! boolean (or numeric) meaning is an [`EvalError`], so a malformed rule
//! never reads as a silent non-match.

use crate::error::EvalError;
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::number::Number;
use std::cmp::Ordering;

/// Evaluates expressions for one target number.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'n> {
    number: &'n Number,
}

impl<'n> Evaluator<'n> {
    pub fn new(number: &'n Number) -> Self {
        Evaluator { number }
    }

    pub fn evaluate_bool(&self, expr: &Expr) -> Result<bool, EvalError> {
        match expr {
            Expr::Parenthesis(inner) => self.evaluate_bool(inner),
            Expr::Unary(UnaryOp::Not, inner) => Ok(!self.evaluate_bool(inner)?),
            Expr::Binary(op, left, right) => self.binary_bool(*op, left, right, expr),
            Expr::Rule(rule) => match &rule.condition {
                Some(condition) => self.evaluate_bool(condition),
                None => Ok(true),
            },
            Expr::Constant(_)
            | Expr::Argument(_)
            | Expr::Range(..)
            | Expr::Group(_)
            | Expr::Infinite
            | Expr::Samples(_)
            | Expr::RuleInfo(_)
            | Expr::RuleInfos(_) => Err(EvalError::NotABoolean { expr: expr.to_string() }),
        }
    }

    fn binary_bool(&self, op: BinaryOp, left: &Expr, right: &Expr, whole: &Expr) -> Result<bool, EvalError> {
        match op {
            BinaryOp::LogicalAnd => Ok(self.evaluate_bool(left)? && self.evaluate_bool(right)?),
            BinaryOp::LogicalOr => Ok(self.evaluate_bool(left)? || self.evaluate_bool(right)?),
            BinaryOp::ExclusiveOr => Ok(self.evaluate_bool(left)? != self.evaluate_bool(right)?),
            BinaryOp::Equal | BinaryOp::NotEqual if left.is_boolean() => {
                let same = self.evaluate_bool(left)? == self.evaluate_bool(right)?;
                Ok(same == (op == BinaryOp::Equal))
            }
            BinaryOp::Equal => {
                let value = self.evaluate_number(left)?;
                self.contains(right, &value)
            }
            BinaryOp::NotEqual => {
                let value = self.evaluate_number(left)?;
                Ok(!self.contains(right, &value)?)
            }
            BinaryOp::Less | BinaryOp::LessOrEqual | BinaryOp::Greater | BinaryOp::GreaterOrEqual => {
                let ordering = self.compare(left, right)?;
                Ok(match op {
                    BinaryOp::Less => ordering == Ordering::Less,
                    BinaryOp::LessOrEqual => ordering != Ordering::Greater,
                    BinaryOp::Greater => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                })
            }
            BinaryOp::Modulo => Err(EvalError::NotABoolean { expr: whole.to_string() }),
        }
    }

    /// Whether `value` is one of the values described by `set`.
    ///
    /// A range only contains integers, so `2.5` is not in `2..3`.
    fn contains(&self, set: &Expr, value: &Number) -> Result<bool, EvalError> {
        match set {
            Expr::Group(items) => {
                for item in items {
                    if self.contains(item, value)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Expr::Range(min, max) => {
                if !value.is_integer() {
                    return Ok(false);
                }
                let min = self.evaluate_number(min)?;
                let max = self.evaluate_number(max)?;
                let above = value.value_cmp(&min).is_some_and(|o| o != Ordering::Less);
                let below = value.value_cmp(&max).is_some_and(|o| o != Ordering::Greater);
                Ok(above && below)
            }
            Expr::Parenthesis(inner) if matches!(**inner, Expr::Group(_) | Expr::Range(..)) => {
                self.contains(inner, value)
            }
            other => Ok(value.value_eq(&self.evaluate_number(other)?)),
        }
    }

    fn compare(&self, left: &Expr, right: &Expr) -> Result<Ordering, EvalError> {
        let l = self.evaluate_number(left)?;
        let r = self.evaluate_number(right)?;
        l.value_cmp(&r).ok_or_else(|| EvalError::NotComparable { left: l.to_string(), right: r.to_string() })
    }

    pub fn evaluate_number(&self, expr: &Expr) -> Result<Number, EvalError> {
        match expr {
            Expr::Constant(value) => Ok(value.clone()),
            Expr::Argument(operand) => Ok(self.number.operand(*operand)),
            Expr::Parenthesis(inner) => self.evaluate_number(inner),
            Expr::Binary(BinaryOp::Modulo, left, right) => {
                let value = self.evaluate_number(left)?;
                let divisor = self.divisor(right)?;
                value.modulo(divisor).ok_or_else(|| EvalError::DivisionByZero { expr: expr.to_string() })
            }
            Expr::Binary(..)
            | Expr::Unary(..)
            | Expr::Range(..)
            | Expr::Group(_)
            | Expr::Infinite
            | Expr::Samples(_)
            | Expr::RuleInfo(_)
            | Expr::RuleInfos(_)
            | Expr::Rule(_) => Err(EvalError::NotANumber { expr: expr.to_string() }),
        }
    }

    fn divisor(&self, expr: &Expr) -> Result<i64, EvalError> {
        let value = self.evaluate_number(expr)?;
        let out_of_range = || EvalError::ModuloOutOfRange { divisor: value.to_string() };
        if !value.is_integer() {
            return Err(out_of_range());
        }
        let divisor = value.try_i64().ok_or_else(out_of_range)?;
        i32::try_from(divisor).map(i64::from).map_err(|_| out_of_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse_expression;

    fn eval(rule: &str, value: &str) -> bool {
        let expr = parse_expression(rule).unwrap();
        let number = Number::parse(value).unwrap();
        Evaluator::new(&number).evaluate_bool(&expr).unwrap()
    }

    #[test]
    fn english_one() {
        assert!(eval("i = 1 and v = 0", "1"));
        assert!(!eval("i = 1 and v = 0", "1.0"));
        assert!(!eval("i = 1 and v = 0", "21"));
    }

    #[test]
    fn ranges_only_contain_integers() {
        assert!(eval("n = 2..4", "3"));
        assert!(eval("n = 2..4", "3.0"));
        assert!(!eval("n = 2..4", "3.5"));
        assert!(eval("n != 2..4", "3.5"));
        assert!(eval("n % 100 = 3..10", "1005"));
    }

    #[test]
    fn groups_are_membership() {
        assert!(eval("n % 10 = 1, 3, 5..7", "16"));
        assert!(!eval("n % 10 = 1, 3, 5..7", "14"));
        assert!(eval("i = 0,1", "1.5"));
    }

    #[test]
    fn relational_operators_compare_values() {
        assert!(eval("n < 2", "1.99"));
        assert!(eval("n >= 2", "2.00"));
        assert!(!eval("n > 2", "2"));
        assert!(eval("n <= 0x10", "16"));
    }

    #[test]
    fn boolean_chains() {
        assert!(eval("n = 1 == v = 0", "1"));
        assert!(eval("n = 1 == v = 0", "2.5"));
        assert!(eval("n = 1 != v = 0", "1.0"));
        assert!(eval("not (n = 1 or n = 2)", "3"));
    }

    #[test]
    fn exponent_operand() {
        let many = "e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5";
        assert!(eval(many, "1000000"));
        assert!(!eval(many, "1c3"));
        assert!(eval(many, "1c6"));
        assert!(!eval(many, "1000"));
    }

    #[test]
    fn modulo_errors_are_hard_failures() {
        let number = Number::parse("10").unwrap();
        let evaluator = Evaluator::new(&number);

        let zero = parse_expression("n % 0 = 1").unwrap();
        assert!(matches!(evaluator.evaluate_bool(&zero), Err(EvalError::DivisionByZero { .. })));

        let fractional = parse_expression("n % 2.5 = 0").unwrap();
        assert!(matches!(evaluator.evaluate_bool(&fractional), Err(EvalError::ModuloOutOfRange { .. })));

        let huge = parse_expression("n % 4294967296 = 0").unwrap();
        assert!(matches!(evaluator.evaluate_bool(&huge), Err(EvalError::ModuloOutOfRange { .. })));
    }

    #[test]
    fn unsupported_nodes_fail_loudly() {
        let number = Number::parse("1").unwrap();
        let evaluator = Evaluator::new(&number);
        assert!(matches!(evaluator.evaluate_bool(&Expr::constant(1)), Err(EvalError::NotABoolean { .. })));
        assert!(matches!(evaluator.evaluate_bool(&Expr::Infinite), Err(EvalError::NotABoolean { .. })));
        let relation = parse_expression("n = 1").unwrap();
        assert!(matches!(evaluator.evaluate_number(&relation), Err(EvalError::NotANumber { .. })));
    }

    #[test]
    fn empty_number_is_not_comparable() {
        let number = Number::Empty;
        let expr = parse_expression("n < 1").unwrap();
        assert!(matches!(Evaluator::new(&number).evaluate_bool(&expr), Err(EvalError::NotComparable { .. })));
        let expr = parse_expression("n = 1").unwrap();
        assert!(!Evaluator::new(&number).evaluate_bool(&expr).unwrap());
    }
}
