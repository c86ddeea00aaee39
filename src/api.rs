use crate::engine::{self, Resolver, SelectionRun};
use crate::error::{ParseError, PluralError};
use crate::number::Number;
use crate::rules::CLDR;
use crate::{PluralRuleInfo, Rule};
use std::time::Duration;

/// What is being asked: which culture, which plural category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Culture name as used in the rule tables, e.g. `"en"` or `"ru"`.
    pub culture: String,
    /// `"cardinal"` or `"ordinal"`.
    pub category: String,
}

impl Default for Context {
    fn default() -> Self {
        Self::cardinal("en")
    }
}

impl Context {
    pub fn cardinal(culture: &str) -> Self {
        Self { culture: culture.to_string(), category: "cardinal".to_string() }
    }

    pub fn ordinal(culture: &str) -> Self {
        Self { culture: culture.to_string(), category: "ordinal".to_string() }
    }

    fn filter(&self) -> PluralRuleInfo {
        PluralRuleInfo::query(&self.category, &self.culture)
    }
}

/// Options that affect selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Registered table name, or rule text to parse.
    pub rule_set: String,
}

impl Default for Options {
    fn default() -> Self {
        Self { rule_set: CLDR.to_string() }
    }
}

/// Result from [`select`] and [`select_with`].
#[derive(Debug, Clone)]
pub struct Selection {
    /// The number as read from the input text.
    pub number: Number,
    /// Matching case names, optional cases first, the mandatory case last.
    /// Empty when no rule set applies.
    pub cases: Vec<String>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl Selection {
    /// The mandatory case, e.g. `"one"` or `"other"`.
    pub fn case(&self) -> Option<&str> {
        self.cases.last().map(String::as_str)
    }
}

/// Additional details returned by [`select_verbose_with`].
#[derive(Debug, Clone)]
pub struct SelectionDetails {
    pub total: Duration,
    pub number: Duration,
    pub resolve: Duration,
    pub evaluate: Duration,
    /// Name of the rule collection that answered.
    pub rule_set: String,
    /// Optional cases in the evaluated rule set.
    pub optional_cases: usize,
    /// Matching rules printed as rule text.
    pub rules: Vec<String>,
    /// Operands of the number, in `n i v w f t e` order.
    pub operands: Vec<(&'static str, String)>,
}

/// Result from [`select_verbose_with`].
#[derive(Debug, Clone)]
pub struct SelectionVerbose {
    pub number: Number,
    pub cases: Vec<String>,
    pub elapsed: Duration,
    pub details: SelectionDetails,
}

/// Parse rule text into rules.
///
/// # Example
/// ```
/// use plurality::parse_rules;
///
/// let rules = parse_rules("[Case=one] i = 1 and v = 0 @integer 1; [Case=other]").unwrap();
/// assert_eq!(rules.len(), 2);
/// ```
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, ParseError> {
    engine::parse_rule_text(text)?.into_iter().map(Rule::from_expr).collect()
}

/// Select the cardinal case of `number` in `culture` using the built-in CLDR
/// rules.
///
/// # Example
/// ```
/// use plurality::select;
///
/// assert_eq!(select("en", "1").unwrap().case(), Some("one"));
/// assert_eq!(select("en", "1.0").unwrap().case(), Some("other"));
/// ```
pub fn select(culture: &str, number: &str) -> Result<Selection, PluralError> {
    select_with(number, &Context::cardinal(culture), &Options::default())
}

/// Select the case of `number` for `context`, using the rule set named in
/// `options`.
pub fn select_with(number: &str, context: &Context, options: &Options) -> Result<Selection, PluralError> {
    let run = SelectionRun::execute(Resolver::global(), &options.rule_set, &context.filter(), number)?;
    Ok(Selection { cases: case_names(&run), number: run.number, elapsed: run.metrics.total })
}

/// Like [`select_with`], with timings and the matching rules.
pub fn select_verbose_with(
    number: &str,
    context: &Context,
    options: &Options,
) -> Result<SelectionVerbose, PluralError> {
    let run = SelectionRun::execute(Resolver::global(), &options.rule_set, &context.filter(), number)?;

    let rules = run.matches.iter().flat_map(|m| m.iter()).map(|rule| rule.to_string()).collect();
    let operands = ["n", "i", "v", "w", "f", "t", "e"]
        .into_iter()
        .filter_map(|name| crate::Operand::from_name(name).map(|op| (name, run.number.operand(op).to_string())))
        .collect();

    let details = SelectionDetails {
        total: run.metrics.total,
        number: run.metrics.number,
        resolve: run.metrics.resolve,
        evaluate: run.metrics.evaluate,
        rule_set: run.rule_set.clone(),
        optional_cases: run.optional_cases,
        rules,
        operands,
    };

    Ok(SelectionVerbose { cases: case_names(&run), number: run.number, elapsed: run.metrics.total, details })
}

fn case_names(run: &SelectionRun) -> Vec<String> {
    run.matches.iter().flat_map(|m| m.iter()).map(|rule| rule.case().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_returns_cases() {
        let res = select("en", "1").unwrap();
        assert_eq!(res.cases, ["one"]);
        assert_eq!(res.number.to_string(), "1");
        assert!(res.elapsed >= Duration::ZERO);

        assert_eq!(select("en", "21").unwrap().case(), Some("other"));
        assert_eq!(select("ru", "22").unwrap().case(), Some("few"));
    }

    #[test]
    fn select_with_context_and_options() {
        let res = select_with("3", &Context::ordinal("en"), &Options::default()).unwrap();
        assert_eq!(res.case(), Some("few"));

        let optional = Options { rule_set: "Unicode.CLDR.Optional".into() };
        let res = select_with("0", &Context::cardinal("en"), &optional).unwrap();
        assert_eq!(res.cases, ["zero", "other"]);

        let inline = Options { rule_set: "[Case=one] n = 1..3; [Case=other]".into() };
        assert_eq!(select_with("2", &Context::default(), &inline).unwrap().case(), Some("one"));
    }

    #[test]
    fn unknown_culture_has_no_cases() {
        let res = select("xx", "1").unwrap();
        assert!(res.cases.is_empty());
        assert_eq!(res.case(), None);
    }

    #[test]
    fn errors_surface() {
        assert!(matches!(select("en", "1x"), Err(PluralError::Number(_))));
        let missing = Options { rule_set: "Unicode.Nope".into() };
        assert!(matches!(
            select_with("1", &Context::default(), &missing),
            Err(PluralError::RuleSetNotFound { .. })
        ));
    }

    #[test]
    fn verbose_includes_metrics_and_rules() {
        let res = select_verbose_with("1.20", &Context::cardinal("en"), &Options::default()).unwrap();
        assert_eq!(res.cases, ["other"]);
        assert_eq!(res.elapsed, res.details.total);
        assert!(res.details.evaluate <= res.details.total);
        assert_eq!(res.details.rule_set, "Unicode.CLDR");
        assert_eq!(res.details.rules.len(), 1);
        assert!(res.details.rules[0].contains("Case=other"));
        let v = res.details.operands.iter().find(|(name, _)| *name == "v").unwrap();
        assert_eq!(v.1, "2");
        let t = res.details.operands.iter().find(|(name, _)| *name == "t").unwrap();
        assert_eq!(t.1, "2");
    }
}
