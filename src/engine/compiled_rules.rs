//! Rule-set compilation.
//!
//! A rule set is every case of one `(rule set, culture, category)`. Cases are
//! either *optional* (any number may match) or *mandatory* (exactly one is
//! expected to match, `other` last). Answering "which cases match" naively
//! means combining the optional matches with the mandatory winner on every
//! call. Instead, all combinations are built once:
//!
//! ```text
//! optional  [A, B]        mandatory [one, other]
//!
//! mask:        0b00      0b01        0b10        0b11
//! one   ──▶  [one]     [A, one]    [B, one]    [A, B, one]
//! other ──▶  [other]   [A, other]  [B, other]  [A, B, other]
//! ```
//!
//! At evaluation time the optional rules produce a bitmask, the first
//! matching mandatory rule picks a row, and the shared array at
//! `table[row][mask]` is returned as-is.
//!
//! ## Invariants
//!
//! - The table is a pure function of the rule list and can be rebuilt at any
//!   time.
//! - At most [`MAX_OPTIONAL_CASES`] optional rules (the table has
//!   `2^count` columns); more is a configuration error at construction time.
//! - Optional rules keep their relative order inside every returned array.

use crate::error::{EvalError, PluralError};
use crate::number::Number;
use crate::{Optionality, PluralRuleInfo, Rule};
use std::sync::Arc;

/// Largest number of optional cases in one rule set.
pub const MAX_OPTIONAL_CASES: usize = 10;

/// Matching rules, optional cases first, the mandatory case last.
pub type Matches = Arc<[Arc<Rule>]>;

/// Precomputed evaluation table for one rule set.
#[derive(Debug)]
pub struct CompiledRuleSet {
    key: PluralRuleInfo,
    optional: Vec<Arc<Rule>>,
    mandatory: Vec<Arc<Rule>>,
    /// `table[mandatory_index][optional_mask]`
    table: Vec<Vec<Matches>>,
}

impl CompiledRuleSet {
    /// Partition `rules` (stable) and build the permutation table.
    pub fn new(key: PluralRuleInfo, rules: Vec<Arc<Rule>>) -> Result<Self, PluralError> {
        let (optional, mandatory): (Vec<_>, Vec<_>) =
            rules.into_iter().partition(|rule| rule.info.optional == Optionality::Optional);

        if optional.len() > MAX_OPTIONAL_CASES {
            return Err(PluralError::TooManyOptionalCases {
                key: key.to_string(),
                count: optional.len(),
                max: MAX_OPTIONAL_CASES,
            });
        }

        let width = 1usize << optional.len();
        let table = mandatory
            .iter()
            .map(|winner| {
                (0..width)
                    .map(|mask| {
                        let mut row: Vec<Arc<Rule>> = optional
                            .iter()
                            .enumerate()
                            .filter(|(bit, _)| mask & (1 << bit) != 0)
                            .map(|(_, rule)| Arc::clone(rule))
                            .collect();
                        row.push(Arc::clone(winner));
                        Matches::from(row)
                    })
                    .collect()
            })
            .collect();

        tracing::debug!(
            rule_set = %key,
            optional = optional.len(),
            mandatory = mandatory.len(),
            "compiled rule set"
        );

        Ok(CompiledRuleSet { key, optional, mandatory, table })
    }

    pub fn key(&self) -> &PluralRuleInfo {
        &self.key
    }

    /// All rules, optional first.
    pub fn rules(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.optional.iter().chain(self.mandatory.iter())
    }

    pub fn optional_count(&self) -> usize {
        self.optional.len()
    }

    /// Matching cases for `number`.
    ///
    /// `Ok(None)` means no mandatory case matched, which only happens for a
    /// rule set without a catch-all case.
    pub fn evaluate(&self, number: &Number) -> Result<Option<Matches>, EvalError> {
        let mut mask = 0usize;
        for (bit, rule) in self.optional.iter().enumerate() {
            if rule.evaluate(number)? {
                mask |= 1 << bit;
            }
        }

        for (row, rule) in self.mandatory.iter().enumerate() {
            if rule.evaluate(number)? {
                tracing::trace!(rule_set = %self.key, %number, mask, case = rule.case(), "matched");
                return Ok(Some(Arc::clone(&self.table[row][mask])));
            }
        }

        tracing::debug!(rule_set = %self.key, %number, "no mandatory case matched");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_rules;

    fn compile(text: &str) -> Result<CompiledRuleSet, PluralError> {
        let rules = parse_rules(text).unwrap().into_iter().map(Arc::new).collect();
        CompiledRuleSet::new(PluralRuleInfo::default(), rules)
    }

    fn cases(set: &CompiledRuleSet, value: &str) -> Vec<String> {
        let number = Number::parse(value).unwrap();
        match set.evaluate(&number).unwrap() {
            Some(matches) => matches.iter().map(|r| r.case().to_string()).collect(),
            None => Vec::new(),
        }
    }

    const SYNTHETIC: &str = "[Case=A,Optional=1] n = 5; [Case=B,Optional=1] n = 7; [Case=other]";

    #[test]
    fn optional_cases_come_first() {
        let set = compile(SYNTHETIC).unwrap();
        assert_eq!(set.optional_count(), 2);
        assert_eq!(cases(&set, "5"), ["A", "other"]);
        assert_eq!(cases(&set, "7"), ["B", "other"]);
        assert_eq!(cases(&set, "3"), ["other"]);
    }

    #[test]
    fn repeated_calls_share_the_precomputed_array() {
        let set = compile(SYNTHETIC).unwrap();
        let five = Number::from(5);
        let first = set.evaluate(&five).unwrap().unwrap();
        let second = set.evaluate(&five).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let seven = set.evaluate(&Number::from(7)).unwrap().unwrap();
        assert!(!Arc::ptr_eq(&first, &seven));
    }

    #[test]
    fn overlapping_optional_cases_combine() {
        let set = compile("[Case=low,Optional=1] n < 10; [Case=odd,Optional=1] n % 2 = 1; [Case=other]").unwrap();
        assert_eq!(cases(&set, "3"), ["low", "odd", "other"]);
        assert_eq!(cases(&set, "4"), ["low", "other"]);
        assert_eq!(cases(&set, "11"), ["odd", "other"]);
    }

    #[test]
    fn first_mandatory_match_wins() {
        let set = compile("[Case=one] i = 1 and v = 0; [Case=other]").unwrap();
        assert_eq!(cases(&set, "1"), ["one"]);
        assert_eq!(cases(&set, "1.0"), ["other"]);
    }

    #[test]
    fn no_mandatory_match_is_none() {
        let set = compile("[Case=one] n = 1").unwrap();
        assert!(set.evaluate(&Number::from(2)).unwrap().is_none());
        let empty = CompiledRuleSet::new(PluralRuleInfo::default(), Vec::new()).unwrap();
        assert!(empty.evaluate(&Number::from(2)).unwrap().is_none());
    }

    #[test]
    fn more_than_ten_optional_cases_is_rejected() {
        let text = (0..=MAX_OPTIONAL_CASES)
            .map(|i| format!("[Case=c{i},Optional=1] n = {i}"))
            .chain(std::iter::once("[Case=other]".to_string()))
            .collect::<Vec<_>>()
            .join("; ");
        match compile(&text) {
            Err(PluralError::TooManyOptionalCases { count, max, .. }) => {
                assert_eq!(count, 11);
                assert_eq!(max, 10);
            }
            other => panic!("unexpected {other:?}"),
        }

        let ten = (0..MAX_OPTIONAL_CASES).map(|i| format!("[Case=c{i},Optional=1] n = {i}")).collect::<Vec<_>>();
        let set = compile(&format!("{}; [Case=other]", ten.join("; "))).unwrap();
        assert_eq!(cases(&set, "4"), ["c4", "other"]);
    }

    #[test]
    fn evaluation_errors_propagate() {
        let set = compile("[Case=one] n % 0 = 1; [Case=other]").unwrap();
        assert!(set.evaluate(&Number::from(1)).is_err());
    }
}
