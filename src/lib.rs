extern crate self as plurality;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod expr;
mod number;
mod rules;

pub use api::{
    Context, Options, Selection, SelectionDetails, SelectionVerbose, parse_rules, select, select_verbose_with,
    select_with,
};
pub use engine::{
    CompiledRuleSet, Evaluator, MAX_OPTIONAL_CASES, Matches, PluralRuleSource, PluralScope, Reader, Resolved, Resolver,
    RuleCollection, SelectionMetrics, SelectionRun, Take, Token, TokenInput, TokenKind, parse_expression,
    parse_rule_text, tokenize,
};
pub use error::{EvalError, NumberError, ParseError, PluralError};
pub use expr::{BinaryOp, Expr, InfoExpr, RuleExpr, SamplesExpr, SamplesKind, UnaryOp};
pub use number::{Decimal, MAX_DECIMAL_SCALE, MAX_EXPONENT_SHIFT, Number, Operand, TextNumber};
pub use rules::{CLDR, CLDR_OPTIONAL};

use std::fmt;
use std::hash::{Hash, Hasher};

// --- Rule identity ----------------------------------------------------------

/// Whether a case is optional.
///
/// `Any` is only meaningful in a query filter ("all matching cases").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Optionality {
    #[default]
    Mandatory = 0,
    Optional = 1,
    Any = -1,
}

impl Optionality {
    fn from_info(value: &str) -> Option<Optionality> {
        match value.to_ascii_lowercase().as_str() {
            "0" | "false" | "mandatory" => Some(Optionality::Mandatory),
            "1" | "true" | "optional" => Some(Optionality::Optional),
            "any" => Some(Optionality::Any),
            _ => None,
        }
    }
}

/// Identity of a rule: `(RuleSet, Category, Culture, Case, Optional)`.
///
/// Equality and hashing ignore `optional`. In [`PluralRuleInfo::matches`] a
/// `None` field or `Optionality::Any` matches anything.
#[derive(Debug, Clone, Default)]
pub struct PluralRuleInfo {
    pub rule_set: Option<String>,
    pub category: Option<String>,
    pub culture: Option<String>,
    pub case: Option<String>,
    pub optional: Optionality,
}

impl PluralRuleInfo {
    /// Filter asking for every matching case of one culture and category.
    pub fn query(category: &str, culture: &str) -> PluralRuleInfo {
        PluralRuleInfo {
            rule_set: None,
            category: Some(category.to_string()),
            culture: Some(culture.to_string()),
            case: None,
            optional: Optionality::Any,
        }
    }

    pub fn with_rule_set(mut self, rule_set: &str) -> PluralRuleInfo {
        self.rule_set = Some(rule_set.to_string());
        self
    }

    /// True when every field set in `filter` equals the same field here.
    pub fn matches(&self, filter: &PluralRuleInfo) -> bool {
        fn field(mine: &Option<String>, wanted: &Option<String>) -> bool {
            match wanted {
                None => true,
                Some(w) => mine.as_deref().is_some_and(|m| m.eq_ignore_ascii_case(w)),
            }
        }
        field(&self.rule_set, &filter.rule_set)
            && field(&self.category, &filter.category)
            && field(&self.culture, &filter.culture)
            && field(&self.case, &filter.case)
            && (filter.optional == Optionality::Any || filter.optional == self.optional)
    }

    /// The rule-set part of the identity: case and optionality cleared.
    pub fn set_key(&self) -> PluralRuleInfo {
        PluralRuleInfo { case: None, optional: Optionality::Any, ..self.clone() }
    }

    fn fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("RuleSet", self.rule_set.as_deref()),
            ("Category", self.category.as_deref()),
            ("Culture", self.culture.as_deref()),
            ("Case", self.case.as_deref()),
        ]
    }

    fn to_infos(&self) -> Vec<InfoExpr> {
        let mut infos: Vec<InfoExpr> = self
            .fields()
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| InfoExpr { name: name.to_string(), value: v.to_string() }))
            .collect();
        if self.optional == Optionality::Optional {
            infos.push(InfoExpr { name: "Optional".to_string(), value: "1".to_string() });
        }
        infos
    }

    fn from_infos(infos: &[InfoExpr]) -> Result<PluralRuleInfo, ParseError> {
        let mut info = PluralRuleInfo::default();
        for item in infos {
            let value = Some(item.value.clone());
            match item.name.to_ascii_lowercase().as_str() {
                "ruleset" => info.rule_set = value,
                "category" => info.category = value,
                "culture" => info.culture = value,
                "case" => info.case = value,
                "optional" => {
                    info.optional = Optionality::from_info(&item.value).ok_or_else(|| ParseError::InvalidInfo {
                        name: item.name.clone(),
                        value: item.value.clone(),
                    })?;
                }
                _ => return Err(ParseError::InvalidInfo { name: item.name.clone(), value: item.value.clone() }),
            }
        }
        Ok(info)
    }
}

fn lower(field: &Option<String>) -> Option<String> {
    field.as_ref().map(|s| s.to_ascii_lowercase())
}

impl PartialEq for PluralRuleInfo {
    fn eq(&self, other: &PluralRuleInfo) -> bool {
        lower(&self.rule_set) == lower(&other.rule_set)
            && lower(&self.category) == lower(&other.category)
            && lower(&self.culture) == lower(&other.culture)
            && lower(&self.case) == lower(&other.case)
    }
}

impl Eq for PluralRuleInfo {}

impl Hash for PluralRuleInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        lower(&self.rule_set).hash(state);
        lower(&self.category).hash(state);
        lower(&self.culture).hash(state);
        lower(&self.case).hash(state);
    }
}

impl fmt::Display for PluralRuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Expr::RuleInfos(self.to_infos()))
    }
}

// --- Rules ------------------------------------------------------------------

/// How a rule decides whether it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Matches when `n` is zero.
    Zero,
    /// Matches when `n` is one.
    One,
    Expression(Expr),
    /// The catch-all case.
    TrueAlways,
}

/// Largest number of values [`Rule::sample_values`] expands per rule.
pub const MAX_SAMPLE_VALUES: usize = 1024;

/// One parsed plural rule. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub info: PluralRuleInfo,
    pub kind: RuleKind,
    pub samples: Vec<SamplesExpr>,
}

impl Rule {
    /// Build a rule from its parsed form.
    ///
    /// A rule without a condition is only valid for the `zero`, `one` and
    /// `other` cases (or when no case is named).
    pub fn from_expr(expr: RuleExpr) -> Result<Rule, ParseError> {
        let info = PluralRuleInfo::from_infos(&expr.infos)?;
        let kind = match expr.condition {
            Some(condition) => RuleKind::Expression(*condition),
            None => match info.case.as_deref().map(str::to_ascii_lowercase).as_deref() {
                Some("zero") => RuleKind::Zero,
                Some("one") => RuleKind::One,
                None | Some("other") => RuleKind::TrueAlways,
                Some(case) => return Err(ParseError::MissingCondition { case: case.to_string() }),
            },
        };
        Ok(Rule { info, kind, samples: expr.samples })
    }

    /// Case name, `other` when none is given.
    pub fn case(&self) -> &str {
        self.info.case.as_deref().unwrap_or("other")
    }

    pub fn is_optional(&self) -> bool {
        self.info.optional == Optionality::Optional
    }

    pub fn condition(&self) -> Option<&Expr> {
        match &self.kind {
            RuleKind::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn evaluate(&self, number: &Number) -> Result<bool, EvalError> {
        match &self.kind {
            RuleKind::Zero => Ok(number.has_value() && number.n().value_eq(&Number::Int(0))),
            RuleKind::One => Ok(number.n().value_eq(&Number::Int(1))),
            RuleKind::Expression(expr) => Evaluator::new(number).evaluate_bool(expr),
            RuleKind::TrueAlways => Ok(true),
        }
    }

    /// The rule in its parsed form; printing it yields rule text that reads
    /// back to an equal rule.
    pub fn to_expr(&self) -> RuleExpr {
        RuleExpr {
            infos: self.info.to_infos(),
            condition: self.condition().map(|c| Box::new(c.clone())),
            samples: self.samples.clone(),
        }
    }

    /// Concrete sample values. Ranges are enumerated at the precision of
    /// their bounds (`0.0~0.3` gives `0.0, 0.1, 0.2, 0.3`), at most
    /// [`MAX_SAMPLE_VALUES`] in total.
    pub fn sample_values(&self) -> Vec<(SamplesKind, Number)> {
        let mut out = Vec::new();
        for samples in &self.samples {
            for value in &samples.values {
                if out.len() >= MAX_SAMPLE_VALUES {
                    return out;
                }
                match value {
                    Expr::Constant(n) => out.push((samples.kind, n.clone())),
                    Expr::Range(low, high) => {
                        let (Expr::Constant(low), Expr::Constant(high)) = (&**low, &**high) else {
                            continue;
                        };
                        let room = MAX_SAMPLE_VALUES - out.len();
                        out.extend(expand_range(low, high, room).into_iter().map(|n| (samples.kind, n)));
                    }
                    _ => {}
                }
            }
        }
        out
    }

    /// Sample values this rule does not match.
    pub fn check_samples(&self) -> Result<Vec<Number>, EvalError> {
        let mut rejected = Vec::new();
        for (_, value) in self.sample_values() {
            if !self.evaluate(&value)? {
                rejected.push(value);
            }
        }
        Ok(rejected)
    }
}

fn expand_range(low: &Number, high: &Number, limit: usize) -> Vec<Number> {
    let scale = low.v().max(high.v());
    let (Some(lo), Some(hi)) = (low.try_decimal(), high.try_decimal()) else {
        return vec![low.clone(), high.clone()];
    };
    let rescale = |d: Decimal| -> Option<i128> {
        let shift = u32::try_from(scale).ok()?.checked_sub(d.scale)?;
        d.mantissa.checked_mul(10i128.checked_pow(shift)?)
    };
    let (Some(lo), Some(hi), Some(unit)) = (rescale(lo), rescale(hi), 10i128.checked_pow(scale as u32)) else {
        return vec![low.clone(), high.clone()];
    };

    let mut out = Vec::new();
    for current in (lo..=hi).take(limit) {
        let text = if scale == 0 {
            current.to_string()
        } else {
            let sign = if current < 0 { "-" } else { "" };
            let abs = current.unsigned_abs();
            let unit = unit as u128;
            format!("{sign}{}.{:0>width$}", abs / unit, abs % unit, width = scale)
        };
        if let Ok(number) = Number::parse(&text) {
            out.push(number);
        }
    }
    out
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}
