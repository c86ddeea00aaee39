//! Selection run metrics.
//!
//! A selection is three steps, each timed separately:
//!
//! ```text
//! "1.5" ──Number::parse──▶ Number ─┐
//! "Unicode.CLDR" ─Resolver::resolve─▶ RuleCollection ─┐
//!                                  └──────────────────┴─▶ evaluate ──▶ Matches
//! ```
//!
//! The plain API only reports the total; the verbose API surfaces the rest.

use super::compiled_rules::Matches;
use super::resolve::{PluralRuleSource, Resolver};
use crate::error::PluralError;
use crate::number::Number;
use crate::PluralRuleInfo;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
pub struct SelectionMetrics {
    /// Total elapsed time for [`SelectionRun::execute`].
    pub total: Duration,
    /// Time spent reading the number text.
    pub number: Duration,
    /// Time spent resolving the rule set name (near zero when cached).
    pub resolve: Duration,
    /// Time spent evaluating the compiled rule set.
    pub evaluate: Duration,
}

/// One selection with its timings.
#[derive(Debug, Clone)]
pub struct SelectionRun {
    pub number: Number,
    /// Name of the resolved rule collection.
    pub rule_set: String,
    /// Matching rules, optional cases first. `None` when the collection has
    /// no rule set for the filter or no mandatory case matched.
    pub matches: Option<Matches>,
    /// Optional cases in the evaluated rule set.
    pub optional_cases: usize,
    pub metrics: SelectionMetrics,
}

impl SelectionRun {
    pub fn execute(
        resolver: &Resolver,
        rule_set: &str,
        filter: &PluralRuleInfo,
        text: &str,
    ) -> Result<SelectionRun, PluralError> {
        let start = Instant::now();

        let number = Number::parse(text)?;
        let parsed = Instant::now();

        let collection = resolver.resolve(rule_set).map_err(|err| (*err).clone())?;
        let resolved = Instant::now();

        let matches = collection.evaluate(filter, &number)?;
        let optional_cases = collection.rule_set(filter).map(|set| set.optional_count()).unwrap_or(0);
        let evaluated = Instant::now();

        tracing::debug!(
            number = %number,
            rule_set,
            filter = %filter,
            matched = matches.as_ref().map(|m| m.len()).unwrap_or(0),
            "selection finished"
        );

        Ok(SelectionRun {
            number,
            rule_set: collection.name().to_string(),
            matches,
            optional_cases,
            metrics: SelectionMetrics {
                total: evaluated - start,
                number: parsed - start,
                resolve: resolved - parsed,
                evaluate: evaluated - resolved,
            },
        })
    }
}
