//! Backtracking rule-text parser.
//!
//! The parser is a set of small `take_*` functions over an immutable
//! [`TokenInput`]. Each one receives a start position and returns either
//! `Some((next_position, value))` or `None`:
//!
//! ```text
//! take_x(input, pos) ──▶ Some((pos', X))   consumed pos..pos'
//!                    └─▶ None              consumed nothing
//! ```
//!
//! Because positions are values, a failed attempt cannot leave a partially
//! advanced cursor behind: the caller still holds the position it started
//! from and simply tries the next alternative. [`Reader`] wraps this for
//! callers that prefer a mutable cursor; it only moves on success.
//!
//! ## Grammar
//!
//! ```text
//! Rules      := Rule (';'? Rule)*
//! Rule       := RuleInfos? Or? Samples*              (at least one token)
//! RuleInfos  := '[' RuleInfo (',' RuleInfo)* ']'
//! RuleInfo   := Name '=' (Name | Integer)
//! Or         := And (('or' | '||') And)*
//! And        := Chain (('and' | '&&') Chain)*
//! Chain      := Unary (('==' | '!=') Unary)*         boolean equality / xor
//! Unary      := ('not' | '!') Unary | Relation | '(' Or ')'
//! Relation   := Value RelOp ValueList
//! RelOp      := '=' | '==' | '!=' | '<' | '<=' | '>' | '>='
//!             | 'is' | 'is' 'not' | 'in' | 'not' 'in'
//! ValueList  := Value (',' Value)*                   Group when > 1
//! Value      := Primary (('%' | 'mod') Primary)*
//! Primary    := Operand | Literal ('..' Literal)? | '(' ValueList ')'
//! Samples    := '@'Name (Literal ('~' Literal)? | ',' | '…')*
//! ```

use super::tokenizer::{Token, TokenKind, tokenize};
use crate::error::ParseError;
use crate::expr::{BinaryOp, Expr, InfoExpr, RuleExpr, SamplesExpr, SamplesKind, UnaryOp};
use crate::number::{Number, Operand, TextNumber};
use std::sync::Arc;

/// Result of a `take_*` function: the position after the match and the value.
pub type Take<T> = Option<(usize, T)>;

/// Tokenized rule text. Positions are indices into the token vector.
#[derive(Debug)]
pub struct TokenInput {
    source: Arc<str>,
    tokens: Vec<Token>,
    /// Pre-read numeric literals, aligned with `tokens`.
    literals: Vec<Option<Number>>,
}

impl TokenInput {
    pub fn new(text: &str) -> Result<TokenInput, ParseError> {
        let source: Arc<str> = Arc::from(text);
        let tokens = tokenize(text)?;
        let literals = tokens
            .iter()
            .map(|t| {
                if !t.is_literal() {
                    return Ok(None);
                }
                TextNumber::scan(Arc::clone(&source), t.span.clone())
                    .map(|n| Some(Number::Text(n)))
                    .map_err(|source| ParseError::InvalidLiteral { offset: t.span.start, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TokenInput { source, tokens, literals })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Position of the first essential token at or after `pos` (or the end).
    pub fn skip_trivia(&self, pos: usize) -> usize {
        let mut pos = pos;
        while pos < self.tokens.len() && !self.tokens[pos].is_essential() {
            pos += 1;
        }
        pos
    }

    /// Next essential token and the position after it.
    fn next(&self, pos: usize) -> Option<(usize, usize)> {
        let at = self.skip_trivia(pos);
        (at < self.tokens.len()).then_some((at + 1, at))
    }

    fn punct(&self, pos: usize, kind: TokenKind) -> Option<usize> {
        let (next, at) = self.next(pos)?;
        (self.tokens[at].kind == kind).then_some(next)
    }

    fn keyword(&self, pos: usize, word: &str) -> Option<usize> {
        let (next, at) = self.next(pos)?;
        let token = &self.tokens[at];
        (token.kind == TokenKind::Name && token.text(&self.source) == word).then_some(next)
    }

    fn take_name(&self, pos: usize) -> Take<String> {
        let (next, at) = self.next(pos)?;
        let token = &self.tokens[at];
        let text = token.text(&self.source);
        match token.kind {
            TokenKind::Name => Some((next, text.to_string())),
            TokenKind::QuotedName => Some((next, text[1..text.len() - 1].to_string())),
            _ => None,
        }
    }

    fn take_literal(&self, pos: usize) -> Take<Number> {
        let (next, at) = self.next(pos)?;
        let number = self.literals[at].clone()?;
        Some((next, number))
    }

    fn take_integer_text(&self, pos: usize) -> Take<String> {
        let (next, at) = self.next(pos)?;
        let token = &self.tokens[at];
        (token.kind == TokenKind::Integer).then(|| (next, token.text(&self.source).to_string()))
    }

    /// Byte offset of the token at `pos` (or the end of the text).
    pub fn offset(&self, pos: usize) -> usize {
        self.tokens.get(pos).map(|t| t.span.start).unwrap_or(self.source.len())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    // --- Rules -----------------------------------------------------------------

    /// Zero or more rules, optionally separated by `;`.
    pub fn take_rules(&self, pos: usize) -> (usize, Vec<RuleExpr>) {
        let mut rules = Vec::new();
        let mut pos = pos;
        loop {
            let mut at = pos;
            while let Some(next) = self.punct(at, TokenKind::Semicolon) {
                at = next;
            }
            match self.take_rule(at) {
                Some((next, rule)) => {
                    rules.push(rule);
                    pos = next;
                }
                None => {
                    // Trailing separators belong to the rule list.
                    if !rules.is_empty() {
                        pos = at;
                    }
                    return (pos, rules);
                }
            }
        }
    }

    pub fn take_rule(&self, pos: usize) -> Take<RuleExpr> {
        let mut at = pos;
        let mut rule = RuleExpr::default();

        if let Some((next, infos)) = self.take_rule_infos(at) {
            rule.infos = infos;
            at = next;
        }
        if let Some((next, condition)) = self.take_boolean(at) {
            rule.condition = Some(Box::new(condition));
            at = next;
        }
        while let Some((next, samples)) = self.take_samples(at) {
            rule.samples.push(samples);
            at = next;
        }

        (at != pos).then_some((at, rule))
    }

    pub fn take_rule_infos(&self, pos: usize) -> Take<Vec<InfoExpr>> {
        let mut at = self.punct(pos, TokenKind::LBracket)?;
        let (next, first) = self.take_rule_info(at)?;
        let mut infos = vec![first];
        at = next;
        while let Some(comma) = self.punct(at, TokenKind::Comma) {
            let (next, info) = self.take_rule_info(comma)?;
            infos.push(info);
            at = next;
        }
        let at = self.punct(at, TokenKind::RBracket)?;
        Some((at, infos))
    }

    pub fn take_rule_info(&self, pos: usize) -> Take<InfoExpr> {
        let (at, name) = self.take_name(pos)?;
        let at = self.punct(at, TokenKind::Assign)?;
        let (at, value) = self.take_name(at).or_else(|| self.take_integer_text(at))?;
        Some((at, InfoExpr { name, value }))
    }

    // --- Boolean expressions ----------------------------------------------------

    pub fn take_boolean(&self, pos: usize) -> Take<Expr> {
        self.take_or(pos)
    }

    fn take_or(&self, pos: usize) -> Take<Expr> {
        let (mut at, mut expr) = self.take_and(pos)?;
        loop {
            let Some(op) = self.keyword(at, "or").or_else(|| self.punct(at, TokenKind::OrOr)) else {
                break;
            };
            let Some((next, right)) = self.take_and(op) else {
                break;
            };
            expr = Expr::binary(BinaryOp::LogicalOr, expr, right);
            at = next;
        }
        Some((at, expr))
    }

    fn take_and(&self, pos: usize) -> Take<Expr> {
        let (mut at, mut expr) = self.take_chain(pos)?;
        loop {
            let Some(op) = self.keyword(at, "and").or_else(|| self.punct(at, TokenKind::AndAnd)) else {
                break;
            };
            let Some((next, right)) = self.take_chain(op) else {
                break;
            };
            expr = Expr::binary(BinaryOp::LogicalAnd, expr, right);
            at = next;
        }
        Some((at, expr))
    }

    fn take_chain(&self, pos: usize) -> Take<Expr> {
        let (mut at, mut expr) = self.take_unary(pos)?;
        loop {
            let (op, after) = if let Some(next) = self.punct(at, TokenKind::Equal) {
                (BinaryOp::Equal, next)
            } else if let Some(next) = self.punct(at, TokenKind::NotEqual) {
                (BinaryOp::ExclusiveOr, next)
            } else {
                break;
            };
            let Some((next, right)) = self.take_unary(after) else {
                break;
            };
            expr = Expr::binary(op, expr, right);
            at = next;
        }
        Some((at, expr))
    }

    fn take_unary(&self, pos: usize) -> Take<Expr> {
        if let Some(after) = self.keyword(pos, "not").or_else(|| self.punct(pos, TokenKind::Bang)) {
            if let Some((at, inner)) = self.take_unary(after) {
                return Some((at, Expr::Unary(UnaryOp::Not, Box::new(inner))));
            }
        }
        if let Some(found) = self.take_relation(pos) {
            return Some(found);
        }
        let at = self.punct(pos, TokenKind::LParen)?;
        let (at, inner) = self.take_or(at)?;
        let at = self.punct(at, TokenKind::RParen)?;
        Some((at, Expr::Parenthesis(Box::new(inner))))
    }

    pub fn take_relation(&self, pos: usize) -> Take<Expr> {
        let (at, left) = self.take_value(pos)?;
        let (at, op) = self.take_relop(at)?;
        let (at, right) = self.take_value_list(at)?;
        Some((at, Expr::binary(op, left, right)))
    }

    fn take_relop(&self, pos: usize) -> Take<BinaryOp> {
        const SYMBOLS: &[(TokenKind, BinaryOp)] = &[
            (TokenKind::Assign, BinaryOp::Equal),
            (TokenKind::Equal, BinaryOp::Equal),
            (TokenKind::NotEqual, BinaryOp::NotEqual),
            (TokenKind::Less, BinaryOp::Less),
            (TokenKind::LessOrEqual, BinaryOp::LessOrEqual),
            (TokenKind::Greater, BinaryOp::Greater),
            (TokenKind::GreaterOrEqual, BinaryOp::GreaterOrEqual),
        ];
        for (kind, op) in SYMBOLS {
            if let Some(at) = self.punct(pos, *kind) {
                return Some((at, *op));
            }
        }
        if let Some(at) = self.keyword(pos, "is") {
            return match self.keyword(at, "not") {
                Some(at) => Some((at, BinaryOp::NotEqual)),
                None => Some((at, BinaryOp::Equal)),
            };
        }
        if let Some(at) = self.keyword(pos, "in") {
            return Some((at, BinaryOp::Equal));
        }
        let at = self.keyword(pos, "not")?;
        let at = self.keyword(at, "in")?;
        Some((at, BinaryOp::NotEqual))
    }

    // --- Value expressions ------------------------------------------------------

    /// A value, or a comma-separated group of values.
    pub fn take_value_list(&self, pos: usize) -> Take<Expr> {
        let (mut at, first) = self.take_value(pos)?;
        let mut items = vec![first];
        while let Some(comma) = self.punct(at, TokenKind::Comma) {
            let Some((next, item)) = self.take_value(comma) else {
                break;
            };
            items.push(item);
            at = next;
        }
        let expr = if items.len() == 1 { items.remove(0) } else { Expr::Group(items) };
        Some((at, expr))
    }

    /// A value without a top-level group, with optional `% divisor` tail.
    pub fn take_value(&self, pos: usize) -> Take<Expr> {
        let (mut at, mut expr) = self.take_primary(pos)?;
        loop {
            let Some(op) = self.punct(at, TokenKind::Percent).or_else(|| self.keyword(at, "mod")) else {
                break;
            };
            let Some((next, right)) = self.take_primary(op) else {
                break;
            };
            expr = Expr::binary(BinaryOp::Modulo, expr, right);
            at = next;
        }
        Some((at, expr))
    }

    fn take_primary(&self, pos: usize) -> Take<Expr> {
        if let Some((next, at)) = self.next(pos) {
            let token = &self.tokens[at];
            if token.kind == TokenKind::Name {
                if let Some(operand) = Operand::from_name(token.text(&self.source)) {
                    return Some((next, Expr::Argument(operand)));
                }
            }
        }
        if let Some((at, min)) = self.take_literal(pos) {
            if let Some(dots) = self.punct(at, TokenKind::DotDot) {
                if let Some((end, max)) = self.take_literal(dots) {
                    return Some((end, Expr::range(Expr::Constant(min), Expr::Constant(max))));
                }
            }
            return Some((at, Expr::Constant(min)));
        }
        let at = self.punct(pos, TokenKind::LParen)?;
        let (at, inner) = self.take_value_list(at)?;
        let at = self.punct(at, TokenKind::RParen)?;
        Some((at, Expr::Parenthesis(Box::new(inner))))
    }

    // --- Samples ----------------------------------------------------------------

    pub fn take_samples(&self, pos: usize) -> Take<SamplesExpr> {
        let (mut at, idx) = self.next(pos)?;
        let token = &self.tokens[idx];
        if token.kind != TokenKind::AtName {
            return None;
        }
        let kind = SamplesKind::from_name(&token.text(&self.source)[1..])?;
        let mut values = Vec::new();

        loop {
            if let Some(next) = self.punct(at, TokenKind::Comma) {
                at = next;
                continue;
            }
            if let Some(next) = self.punct(at, TokenKind::Ellipsis) {
                values.push(Expr::Infinite);
                at = next;
                break;
            }
            let Some((next, low)) = self.take_literal(at) else {
                break;
            };
            at = next;
            let high = self.punct(at, TokenKind::Tilde).and_then(|tilde| self.take_literal(tilde));
            match high {
                Some((next, high)) => {
                    values.push(Expr::range(Expr::Constant(low), Expr::Constant(high)));
                    at = next;
                }
                None => values.push(Expr::Constant(low)),
            }
        }

        Some((at, SamplesExpr { kind, values }))
    }
}

/// A mutable cursor over a [`TokenInput`] that only advances on success.
#[derive(Debug)]
pub struct Reader<'i> {
    input: &'i TokenInput,
    pos: usize,
}

impl<'i> Reader<'i> {
    pub fn new(input: &'i TokenInput) -> Self {
        Reader { input, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Run `take` at the current position; move past the match only if it succeeds.
    pub fn take<T>(&mut self, take: impl FnOnce(&'i TokenInput, usize) -> Take<T>) -> Option<T> {
        let (next, value) = take(self.input, self.pos)?;
        self.pos = next;
        Some(value)
    }

    /// True when only whitespace and comments remain.
    pub fn at_end(&self) -> bool {
        self.input.skip_trivia(self.pos) == self.input.len()
    }
}

fn unparsed(input: &TokenInput, pos: usize) -> ParseError {
    let offset = input.offset(input.skip_trivia(pos));
    ParseError::Unparsed { offset, remainder: input.source()[offset..].trim_end().to_string() }
}

/// Parse every rule in `text`.
///
/// Fails with [`ParseError::Unparsed`] when anything other than whitespace or
/// comments remains after the last rule.
pub fn parse_rule_text(text: &str) -> Result<Vec<RuleExpr>, ParseError> {
    let input = TokenInput::new(text)?;
    let mut reader = Reader::new(&input);
    let rules = reader.take(|input, pos| Some(input.take_rules(pos))).unwrap_or_default();
    if !reader.at_end() {
        return Err(unparsed(&input, reader.position()));
    }
    tracing::trace!(rules = rules.len(), "parsed rule text");
    Ok(rules)
}

/// Parse a single boolean expression such as `i = 1 and v = 0`.
pub fn parse_expression(text: &str) -> Result<Expr, ParseError> {
    let input = TokenInput::new(text)?;
    let mut reader = Reader::new(&input);
    let Some(expr) = reader.take(TokenInput::take_boolean) else {
        return Err(if reader.at_end() { ParseError::Empty } else { unparsed(&input, 0) });
    };
    if !reader.at_end() {
        return Err(unparsed(&input, reader.position()));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(text: &str) -> RuleExpr {
        let mut rules = parse_rule_text(text).unwrap();
        assert_eq!(rules.len(), 1, "expected one rule in {text:?}");
        rules.remove(0)
    }

    fn condition(text: &str) -> Expr {
        *rule(text).condition.unwrap()
    }

    #[test]
    fn parses_english_cardinal_one() {
        let expr = condition("i = 1 and v = 0");
        let Expr::Binary(BinaryOp::LogicalAnd, left, right) = expr else {
            panic!("expected and");
        };
        assert!(matches!(*left, Expr::Binary(BinaryOp::Equal, ..)));
        assert!(matches!(*right, Expr::Binary(BinaryOp::Equal, ..)));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = condition("n = 1 or n = 2 and v = 0");
        let Expr::Binary(BinaryOp::LogicalOr, _, right) = expr else {
            panic!("expected or at the top");
        };
        assert!(matches!(*right, Expr::Binary(BinaryOp::LogicalAnd, ..)));
    }

    #[test]
    fn value_lists_become_groups() {
        let expr = condition("n % 10 = 2..4, 9");
        let Expr::Binary(BinaryOp::Equal, left, right) = expr else {
            panic!("expected relation");
        };
        assert!(matches!(*left, Expr::Binary(BinaryOp::Modulo, ..)));
        let Expr::Group(items) = *right else {
            panic!("expected group");
        };
        assert!(matches!(items[0], Expr::Range(..)));
        assert!(matches!(items[1], Expr::Constant(_)));

        let single = condition("n = 3");
        assert!(matches!(single, Expr::Binary(BinaryOp::Equal, _, ref r) if matches!(**r, Expr::Constant(_))));
    }

    #[test]
    fn keyword_relations() {
        assert_eq!(condition("n is not 1"), condition("n != 1"));
        assert_eq!(condition("n not in 2..4"), condition("n != 2..4"));
        assert_eq!(condition("n mod 10 in 1"), condition("n % 10 = 1"));
        assert_eq!(condition("c = 0"), condition("e = 0"));
    }

    #[test]
    fn negation_and_parentheses() {
        let expr = condition("not (n = 1 or n = 2)");
        let Expr::Unary(UnaryOp::Not, inner) = expr else {
            panic!("expected not");
        };
        assert!(matches!(*inner, Expr::Parenthesis(_)));

        let expr = condition("(n % 100) = 11");
        assert!(matches!(expr, Expr::Binary(BinaryOp::Equal, ref l, _) if matches!(**l, Expr::Parenthesis(_))));
    }

    #[test]
    fn boolean_chains() {
        let expr = condition("n = 1 == v = 0");
        assert!(matches!(expr, Expr::Binary(BinaryOp::Equal, ref l, _) if l.is_boolean()));
        let expr = condition("n = 1 != v = 0");
        assert!(matches!(expr, Expr::Binary(BinaryOp::ExclusiveOr, ..)));
    }

    #[test]
    fn samples_and_infos() {
        let r = rule(
            "[RuleSet=Unicode.CLDR,Category=cardinal,Culture=en,Case=other] \
             @integer 0, 2~16, 100, … @decimal 0.0~1.5, …",
        );
        assert_eq!(r.info("Culture"), Some("en"));
        assert!(r.condition.is_none());
        assert_eq!(r.samples.len(), 2);
        assert_eq!(r.samples[0].kind, SamplesKind::Integer);
        assert_eq!(r.samples[0].values.len(), 4);
        assert!(matches!(r.samples[0].values[1], Expr::Range(..)));
        assert_eq!(r.samples[0].values[3], Expr::Infinite);
    }

    #[test]
    fn exponent_markers_in_rule_text() {
        let r = rule("[Case=many] e = 3 @integer 1⏨3, 2E3 @decimal 1.5⏨3");
        let values: Vec<String> = r.samples.iter().flat_map(|s| s.values.iter()).map(|v| v.to_string()).collect();
        assert_eq!(values, ["1⏨3", "2E3", "1.5⏨3"]);
        assert_eq!(rule(&r.to_string()), r);
        assert!(crate::Rule::from_expr(r).unwrap().check_samples().unwrap().is_empty());

        let expr = parse_expression("n = 1⏨3").unwrap();
        let Expr::Binary(BinaryOp::Equal, _, right) = expr else {
            panic!("expected relation");
        };
        let Expr::Constant(value) = *right else {
            panic!("expected constant");
        };
        assert!(value.value_eq(&Number::from(1000)));
        assert!(value.e().value_eq(&Number::from(3)));
    }

    #[test]
    fn multiple_rules() {
        let rules = parse_rule_text("[Case=one] i = 1 and v = 0 @integer 1; [Case=other] @integer 0, 2~16").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].info("Case"), Some("other"));
        assert!(parse_rule_text("   ").unwrap().is_empty());
    }

    #[test]
    fn reports_unparsed_remainder() {
        match parse_rule_text("n = 1 @integer 1 )") {
            Err(ParseError::Unparsed { offset, remainder }) => {
                assert_eq!(offset, 17);
                assert_eq!(remainder, ")");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(parse_rule_text("n ="), Err(ParseError::Unparsed { offset: 0, .. })));
        assert!(matches!(parse_rule_text("@percent 1"), Err(ParseError::Unparsed { .. })));
    }

    #[test]
    fn failed_take_leaves_position_unchanged() {
        let input = TokenInput::new("n =").unwrap();
        let mut reader = Reader::new(&input);
        assert!(reader.take(TokenInput::take_boolean).is_none());
        assert_eq!(reader.position(), 0);
        assert!(reader.take(TokenInput::take_relation).is_none());
        assert_eq!(reader.position(), 0);

        let input = TokenInput::new("[Case=one n = 1").unwrap();
        let mut reader = Reader::new(&input);
        assert!(reader.take(TokenInput::take_rule_infos).is_none());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn successful_take_advances() {
        let input = TokenInput::new("n = 1 and").unwrap();
        let mut reader = Reader::new(&input);
        let expr = reader.take(TokenInput::take_boolean).unwrap();
        assert_eq!(expr.to_string(), "n = 1");
        assert!(!reader.at_end());
    }

    #[test]
    fn print_then_parse_round_trips() {
        let texts = [
            "i = 1 and v = 0 @integer 1",
            "n % 10 = 2..4 and n % 100 != 12..14 @integer 2~4, 22~24, 32~34, 42~44, 52~54, 62, 102, 1002, …",
            "e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5 \
             @integer 1000000, 1c6, 2c6, … @decimal 1.0000001c6, 1.1c6, …",
            "[RuleSet=Unicode.CLDR,Case=few] not (n = 1 or n = 2) and n is not 7",
            "n = 1 == v = 0",
            "(n % 100) = 11, 12 @decimal 11.0, 12.00",
        ];
        for text in texts {
            let first = rule(text);
            let printed = first.to_string();
            let second = rule(&printed);
            assert_eq!(first, second, "round trip of {text:?} via {printed:?}");
        }
    }

    #[test]
    fn parsing_twice_gives_equal_trees() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let text = "v = 0 and i % 10 = 1 and i % 100 != 11";
        let (a, b) = (rule(text), rule(text));
        assert_eq!(a, b);
        let hash = |r: &RuleExpr| {
            let mut h = DefaultHasher::new();
            r.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn parse_single_expression() {
        assert!(parse_expression("n = 1").is_ok());
        assert_eq!(parse_expression(""), Err(ParseError::Empty));
        assert!(matches!(parse_expression("n = 1 @integer 1"), Err(ParseError::Unparsed { .. })));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn relation() -> impl Strategy<Value = String> {
            (
                prop::sample::select(vec!["n", "i", "v", "w", "f", "t", "e"]),
                prop::option::of(prop::sample::select(vec![10u32, 100, 1000])),
                prop::sample::select(vec!["=", "!=", "is", "is not", "in", "not in"]),
                prop::collection::vec((0u32..200, prop::option::of(1u32..50)), 1..4),
            )
                .prop_map(|(operand, modulo, relop, values)| {
                    let left = match modulo {
                        Some(m) => format!("{operand} % {m}"),
                        None => operand.to_string(),
                    };
                    let right = values
                        .iter()
                        .map(|(low, len)| match len {
                            Some(len) => format!("{low}..{}", low + len),
                            None => low.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{left} {relop} {right}")
                })
        }

        fn condition() -> impl Strategy<Value = String> {
            prop::collection::vec((relation(), any::<bool>()), 1..5).prop_map(|parts| {
                let mut text = String::new();
                for (idx, (relation, or)) in parts.iter().enumerate() {
                    if idx > 0 {
                        text.push_str(if *or { " or " } else { " and " });
                    }
                    text.push_str(relation);
                }
                text
            })
        }

        proptest! {
            #[test]
            fn printed_conditions_parse_back(text in condition()) {
                let first = parse_expression(&text).unwrap();
                let second = parse_expression(&first.to_string()).unwrap();
                prop_assert_eq!(&first, &second);
                prop_assert_eq!(first.to_string(), second.to_string());
            }
        }
    }
}
